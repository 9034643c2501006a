//! Context windows around term occurrences.
//!
//! The index only stores positions, so rendering a window means scanning the
//! raw document again through a [`DocumentSource`] and counting tokens the same
//! way the builder did.

use crate::config::EngineConfig;
use crate::error::SnippetError;
use crate::index::InvertedIndex;
use std::io::{self, BufRead};
use std::ops::Range;

/// Read access to raw document text, by document name.
pub trait DocumentSource {
    fn open(&self, document: &str) -> io::Result<Box<dyn BufRead + '_>>;
}

/// Token range `[start, end)` to show for an occurrence at `position` in a
/// document of `length` tokens.
pub fn window_bounds(position: usize, length: usize, window: usize) -> Range<usize> {
    let half = window / 2;
    if position < half {
        0..window.min(length)
    } else if position + half > length {
        length.saturating_sub(window)..length
    } else {
        position - half..position + half
    }
}

pub struct SnippetExtractor<'a, S: ?Sized> {
    index: &'a InvertedIndex,
    source: &'a S,
    window: usize,
}

impl<'a, S: DocumentSource + ?Sized> SnippetExtractor<'a, S> {
    pub fn new(index: &'a InvertedIndex, source: &'a S, config: &EngineConfig) -> Self {
        Self { index, source, window: config.context_window }
    }

    pub fn window(&self) -> usize { self.window }

    /// Tokens around the first occurrence of `term` in `document`, as written in the source.
    pub fn snippet(&self, term: &str, document: &str) -> Result<Vec<String>, SnippetError> {
        let first = self
            .index
            .positions(term, document)
            .and_then(|p| p.first().copied())
            .ok_or_else(|| {
                if self.index.doc_id(document).is_none() {
                    SnippetError::UnknownDocument(document.to_string())
                } else {
                    SnippetError::TermNotInDocument { term: term.to_string(), document: document.to_string() }
                }
            })?;
        self.snippet_at(document, first as usize)
    }

    pub fn snippet_at(&self, document: &str, position: usize) -> Result<Vec<String>, SnippetError> {
        let length = self
            .index
            .document_length(document)
            .ok_or_else(|| SnippetError::UnknownDocument(document.to_string()))?;
        let span = window_bounds(position, length as usize, self.window);
        read_span(self.source, document, span)
    }
}

fn read_span<S: DocumentSource + ?Sized>(
    source: &S,
    document: &str,
    span: Range<usize>,
) -> Result<Vec<String>, SnippetError> {
    let io_err = |err| SnippetError::Io { document: document.to_string(), source: err };
    let reader = source.open(document).map_err(io_err)?;
    let mut tokens = Vec::with_capacity(span.len());
    let mut counter = 0usize;
    for line in reader.lines() {
        let line = line.map_err(io_err)?;
        for word in line.split_whitespace() {
            if counter >= span.end {
                return Ok(tokens);
            }
            if counter >= span.start {
                tokens.push(word.to_string());
            }
            counter += 1;
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::MemoryCorpus;
    use crate::tokenizer::Stoplist;

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    fn fixture(text: &str) -> (InvertedIndex, MemoryCorpus) {
        let corpus: MemoryCorpus = [("doc", text)].into_iter().collect();
        let index = corpus.build_index(Stoplist::new());
        (index, corpus)
    }

    #[test]
    fn bounds_near_start_interior_and_end() {
        assert_eq!(window_bounds(2, 30, 10), 0..10);
        assert_eq!(window_bounds(2, 4, 10), 0..4);
        assert_eq!(window_bounds(12, 30, 10), 7..17);
        assert_eq!(window_bounds(25, 30, 10), 20..30);
        assert_eq!(window_bounds(27, 30, 10), 20..30);
        assert_eq!(window_bounds(6, 8, 10), 0..8);
    }

    #[test]
    fn interior_window_is_centered() {
        let (index, corpus) = fixture(&numbered(40));
        let extractor = SnippetExtractor::new(&index, &corpus, &EngineConfig::default());
        let words = extractor.snippet("w20", "doc").unwrap();
        assert_eq!(words.len(), 10);
        assert_eq!(words.first().map(String::as_str), Some("w15"));
        assert_eq!(words.last().map(String::as_str), Some("w24"));
    }

    #[test]
    fn window_spans_lines_and_keeps_case() {
        let (index, corpus) = fixture("One two\nthree FOUR five\n\nsix seven eight nine ten eleven twelve");
        let extractor = SnippetExtractor::new(&index, &corpus, &EngineConfig::default());
        let words = extractor.snippet("eleven", "doc").unwrap();
        assert_eq!(words, vec!["three", "FOUR", "five", "six", "seven", "eight", "nine", "ten", "eleven", "twelve"]);
        assert_eq!(extractor.snippet("four", "doc").unwrap().len(), 10);
    }

    #[test]
    fn short_document_returns_everything() {
        let (index, corpus) = fixture("just three words");
        let extractor = SnippetExtractor::new(&index, &corpus, &EngineConfig::default());
        assert_eq!(extractor.snippet("words", "doc").unwrap(), vec!["just", "three", "words"]);
    }

    #[test]
    fn reports_missing_term_and_document() {
        let (index, corpus) = fixture("alpha beta");
        let extractor = SnippetExtractor::new(&index, &corpus, &EngineConfig::default());
        assert!(matches!(extractor.snippet("gamma", "doc"), Err(SnippetError::TermNotInDocument { .. })));
        assert!(matches!(extractor.snippet("alpha", "nope"), Err(SnippetError::UnknownDocument(_))));
    }
}
