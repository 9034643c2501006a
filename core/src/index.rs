use crate::tokenizer::{normalize, tokenize_line, Stoplist};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    /// Base name of the source file, unique within a corpus.
    pub name: String,
    /// Tokens scanned, stop words included. Fixed once the document is scanned.
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Token offsets within the document, strictly increasing.
    pub positions: Vec<u32>,
}

/// Positional inverted index. Built once by [`IndexBuilder`], read-only afterwards.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
    df: Vec<u32>,
    postings: Vec<Vec<Posting>>, // per term, sorted by doc_id
    docs: Vec<DocMeta>,
    doc_id_map: HashMap<String, DocId>,
    by_name: Vec<DocId>,
    stoplist: Stoplist,
}

impl InvertedIndex {
    /// Build an index from `(name, lines)` pairs in one pass.
    pub fn build<I, N, L, S>(stoplist: Stoplist, documents: I) -> Self
    where
        I: IntoIterator<Item = (N, L)>,
        N: Into<String>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = IndexBuilder::new(stoplist);
        for (name, lines) in documents {
            builder.add_document(name, lines);
        }
        builder.finish()
    }

    pub fn num_docs(&self) -> u32 { self.docs.len() as u32 }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    pub fn stoplist(&self) -> &Stoplist { &self.stoplist }

    pub fn is_stop_word(&self, term: &str) -> bool { self.stoplist.is_stop_word(term) }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(&normalize(term)).copied()
    }

    pub fn contains_term(&self, term: &str) -> bool { self.term_id(term).is_some() }

    pub(crate) fn df_by_id(&self, term_id: TermId) -> u32 {
        self.df.get(term_id as usize).copied().unwrap_or(0)
    }

    pub(crate) fn postings_by_id(&self, term_id: TermId) -> &[Posting] {
        self.postings.get(term_id as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All postings for `term`, ordered by document id.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.term_id(term).map(|tid| self.postings_by_id(tid))
    }

    pub(crate) fn positions_by_id(&self, term_id: TermId, doc_id: DocId) -> Option<&[u32]> {
        let plist = self.postings_by_id(term_id);
        plist
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|i| plist[i].positions.as_slice())
    }

    /// Positions of `term` inside `document`, or `None` if it does not occur there.
    pub fn positions(&self, term: &str, document: &str) -> Option<&[u32]> {
        let tid = self.term_id(term)?;
        let doc_id = self.doc_id(document)?;
        self.positions_by_id(tid, doc_id)
    }

    pub fn doc(&self, doc_id: DocId) -> Option<&DocMeta> { self.docs.get(doc_id as usize) }

    pub fn doc_id(&self, name: &str) -> Option<DocId> { self.doc_id_map.get(name).copied() }

    pub fn document_length(&self, name: &str) -> Option<u32> {
        self.doc_id(name).and_then(|id| self.doc(id)).map(|d| d.length)
    }

    /// Document ids in ascending document-name order.
    pub fn doc_ids_by_name(&self) -> &[DocId] { &self.by_name }

    /// Documents in ascending name order.
    pub fn documents(&self) -> impl Iterator<Item = &DocMeta> + '_ {
        self.by_name.iter().map(move |&id| &self.docs[id as usize])
    }

    /// Terms with their document frequency, sorted by term.
    pub fn word_list(&self) -> Vec<(&str, u32)> {
        let mut words: Vec<(&str, u32)> = self
            .terms
            .iter()
            .enumerate()
            .map(|(tid, t)| (t.as_str(), self.df[tid]))
            .collect();
        words.sort_unstable_by(|a, b| a.0.cmp(b.0));
        words
    }
}

/// One-shot builder: documents are added in scan order, `finish` seals the index.
pub struct IndexBuilder {
    index: InvertedIndex,
}

impl IndexBuilder {
    pub fn new(stoplist: Stoplist) -> Self {
        Self { index: InvertedIndex { stoplist, ..InvertedIndex::default() } }
    }

    /// Scan one document. Returns `None` (and indexes nothing) if the name was already added.
    pub fn add_document<N, L, S>(&mut self, name: N, lines: L) -> Option<DocId>
    where
        N: Into<String>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        if self.index.doc_id_map.contains_key(&name) {
            tracing::warn!(document = %name, "duplicate document name, skipping");
            return None;
        }
        let doc_id = self.index.docs.len() as DocId;
        let mut counter: u32 = 0;
        for line in lines {
            for token in tokenize_line(line.as_ref()) {
                let position = counter;
                counter += 1;
                if self.index.stoplist.contains_normalized(&token) { continue; }
                self.insert(token, doc_id, position);
            }
        }
        tracing::debug!(document = %name, length = counter, "scanned document");
        self.index.doc_id_map.insert(name.clone(), doc_id);
        self.index.docs.push(DocMeta { name, length: counter });
        Some(doc_id)
    }

    fn insert(&mut self, term: String, doc_id: DocId, position: u32) {
        let index = &mut self.index;
        let tid = match index.dictionary.get(&term) {
            Some(&tid) => tid,
            None => {
                let tid = index.terms.len() as TermId;
                index.dictionary.insert(term.clone(), tid);
                index.terms.push(term);
                index.df.push(0);
                index.postings.push(Vec::new());
                tid
            }
        };
        let plist = &mut index.postings[tid as usize];
        match plist.last_mut() {
            Some(p) if p.doc_id == doc_id => p.positions.push(position),
            _ => {
                plist.push(Posting { doc_id, positions: vec![position] });
                // first occurrence in this document
                index.df[tid as usize] += 1;
            }
        }
    }

    pub fn finish(self) -> InvertedIndex {
        let mut index = self.index;
        let mut by_name: Vec<DocId> = (0..index.docs.len() as DocId).collect();
        by_name.sort_by(|&a, &b| index.docs[a as usize].name.cmp(&index.docs[b as usize].name));
        index.by_name = by_name;
        tracing::info!(num_docs = index.num_docs(), num_terms = index.num_terms(), "index built");
        index
    }
}
