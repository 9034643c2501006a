//! TF-IDF weights over a built index. Everything here is read-only.

use crate::index::{DocId, InvertedIndex, TermId};

/// `1 + log10(n) - log10(df)`, or `None` when the term occurs nowhere.
pub fn idf_from_counts(total_documents: u32, df: u32) -> Option<f64> {
    if df == 0 {
        return None;
    }
    Some(1.0 + f64::from(total_documents).log10() - f64::from(df).log10())
}

/// `1 + log10(count)`; exactly `0.0` for a zero count.
pub fn tf_from_count(count: usize) -> f64 {
    if count == 0 { 0.0 } else { 1.0 + (count as f64).log10() }
}

impl InvertedIndex {
    pub fn total_documents(&self) -> u32 { self.num_docs() }

    /// Number of documents containing `term`; 0 if it is not indexed.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.term_id(term).map_or(0, |tid| self.df_by_id(tid))
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        idf_from_counts(self.total_documents(), self.document_frequency(term))
    }

    pub(crate) fn idf_by_id(&self, term_id: TermId) -> Option<f64> {
        idf_from_counts(self.total_documents(), self.df_by_id(term_id))
    }

    pub fn tf(&self, term: &str, document: &str) -> f64 {
        tf_from_count(self.positions(term, document).map_or(0, <[u32]>::len))
    }

    pub(crate) fn tf_by_id(&self, term_id: TermId, doc_id: DocId) -> f64 {
        tf_from_count(self.positions_by_id(term_id, doc_id).map_or(0, <[u32]>::len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Stoplist;

    #[test]
    fn idf_undefined_for_absent_terms() {
        assert_eq!(idf_from_counts(10, 0), None);
        let everywhere = idf_from_counts(10, 10).unwrap();
        assert!((everywhere - 1.0).abs() < 1e-12);
    }

    #[test]
    fn idf_decreases_with_df() {
        let rare = idf_from_counts(100, 1).unwrap();
        let common = idf_from_counts(100, 50).unwrap();
        assert!(rare > common);
        assert!((rare - 3.0).abs() < 1e-12);
    }

    #[test]
    fn tf_is_zero_only_when_absent() {
        let index = InvertedIndex::build(Stoplist::new(), [("d", vec!["a a a a a a a a a a b"])]);
        assert_eq!(index.tf("c", "d"), 0.0);
        assert_eq!(index.tf("b", "d"), 1.0);
        assert!((index.tf("a", "d") - 2.0).abs() < 1e-12);
        assert_eq!(index.tf("a", "missing"), 0.0);
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let index = InvertedIndex::build(Stoplist::new(), [("d", vec!["Cat"])]);
        assert_eq!(index.document_frequency("CAT"), 1);
        assert_eq!(index.idf("cat"), Some(1.0));
    }
}
