use crate::index::{DocId, InvertedIndex, TermId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermHit {
    pub document: String,
    pub positions: Vec<u32>,
    pub tf: f64,
    pub tf_idf: f64,
}

/// Per-document statistics for one indexed term, in document-name order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermReport {
    pub term: String,
    pub idf: f64,
    pub hits: Vec<TermHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHit {
    pub document: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The query had no terms at all.
    EmptyQuery,
    StopWord { term: String },
    UnknownTerm { term: String },
    SingleTerm(TermReport),
    AllStopWords,
    /// Every term is indexed but no document contains all of them.
    NoMatch { terms: Vec<String> },
    /// Conjunctive matches, highest combined TF-IDF first.
    Ranked { terms: Vec<String>, hits: Vec<RankedHit> },
    SomeTermsUnknown { unknown: Vec<String> },
    NoTermsKnown { terms: Vec<String> },
}

impl QueryOutcome {
    /// Human-readable explanation for outcomes that carry no results.
    pub fn message(&self) -> Option<String> {
        let msg = match self {
            Self::EmptyQuery => "No query entered. Enter some query.".to_string(),
            Self::StopWord { .. } => {
                "The term you entered is a stop list word and we are not tracking it.".to_string()
            }
            Self::UnknownTerm { term } => {
                format!("Term {} does not exist in our word list.", term.to_uppercase())
            }
            Self::AllStopWords => "All terms are stop list words. Unable to generate results.".to_string(),
            Self::NoMatch { .. } => "All query terms do not appear together in any documents.".to_string(),
            Self::SomeTermsUnknown { .. } => {
                "Some terms are not on word list and so query is unable to generate results.".to_string()
            }
            Self::NoTermsKnown { .. } => {
                "None of the terms appear in our word list. Try with a better query.".to_string()
            }
            Self::SingleTerm(_) | Self::Ranked { .. } => return None,
        };
        Some(msg)
    }
}

/// Evaluate a raw query string against `index`.
pub fn evaluate(index: &InvertedIndex, query: &str) -> QueryOutcome {
    let terms: Vec<&str> = query.split_whitespace().collect();
    match terms.as_slice() {
        [] => QueryOutcome::EmptyQuery,
        [term] => single_term(index, term),
        _ => multi_term(index, &terms),
    }
}

pub fn single_term(index: &InvertedIndex, term: &str) -> QueryOutcome {
    let Some(tid) = index.term_id(term) else {
        return if index.is_stop_word(term) {
            QueryOutcome::StopWord { term: term.to_string() }
        } else {
            QueryOutcome::UnknownTerm { term: term.to_string() }
        };
    };
    let Some(idf) = index.idf_by_id(tid) else {
        return QueryOutcome::UnknownTerm { term: term.to_string() };
    };

    let mut hits = Vec::new();
    for &doc_id in index.doc_ids_by_name() {
        let tf = index.tf_by_id(tid, doc_id);
        if tf == 0.0 { continue; }
        let (Some(doc), Some(positions)) = (index.doc(doc_id), index.positions_by_id(tid, doc_id)) else {
            continue;
        };
        hits.push(TermHit { document: doc.name.clone(), positions: positions.to_vec(), tf, tf_idf: tf * idf });
    }
    QueryOutcome::SingleTerm(TermReport { term: term.to_string(), idf, hits })
}

pub fn multi_term(index: &InvertedIndex, terms: &[&str]) -> QueryOutcome {
    let remaining: Vec<&str> = terms.iter().copied().filter(|t| !index.is_stop_word(t)).collect();
    match remaining.as_slice() {
        [] => return QueryOutcome::AllStopWords,
        [term] => return single_term(index, term),
        _ => {}
    }

    let ids: Vec<Option<TermId>> = remaining.iter().map(|t| index.term_id(t)).collect();
    let known = ids.iter().filter(|id| id.is_some()).count();
    let owned = || remaining.iter().map(|t| t.to_string()).collect::<Vec<_>>();

    if known == 0 {
        return QueryOutcome::NoTermsKnown { terms: owned() };
    }
    if known < remaining.len() {
        let unknown = remaining
            .iter()
            .zip(&ids)
            .filter(|(_, id)| id.is_none())
            .map(|(t, _)| t.to_string())
            .collect();
        return QueryOutcome::SomeTermsUnknown { unknown };
    }

    let ids: Vec<TermId> = ids.into_iter().flatten().collect();
    let mut scored = Vec::new();
    for &doc_id in index.doc_ids_by_name() {
        if let Some(score) = conjunctive_score(index, &ids, doc_id) {
            if let Some(doc) = index.doc(doc_id) {
                scored.push(RankedHit { document: doc.name.clone(), score });
            }
        }
    }

    if scored.is_empty() {
        QueryOutcome::NoMatch { terms: owned() }
    } else {
        QueryOutcome::Ranked { terms: owned(), hits: rank(scored) }
    }
}

/// Sum of `idf * tf` over `ids`, or `None` as soon as one term is missing from the document.
fn conjunctive_score(index: &InvertedIndex, ids: &[TermId], doc_id: DocId) -> Option<f64> {
    if !ids.iter().all(|&tid| index.positions_by_id(tid, doc_id).is_some()) {
        return None;
    }
    ids.iter()
        .map(|&tid| index.idf_by_id(tid).map(|idf| idf * index.tf_by_id(tid, doc_id)))
        .sum()
}

/// Descending score, ties by ascending document name. Zero scores are kept.
pub fn rank(mut hits: Vec<RankedHit>) -> Vec<RankedHit> {
    hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.document.cmp(&b.document)));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(document: &str, score: f64) -> RankedHit {
        RankedHit { document: document.to_string(), score }
    }

    #[test]
    fn rank_breaks_ties_by_name() {
        let ranked = rank(vec![hit("b", 1.0), hit("c", 2.0), hit("a", 1.0), hit("z", 0.0)]);
        let order: Vec<&str> = ranked.iter().map(|h| h.document.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b", "z"]);
    }

    #[test]
    fn whitespace_only_query_is_empty() {
        let index = InvertedIndex::default();
        assert_eq!(evaluate(&index, "   \t "), QueryOutcome::EmptyQuery);
        assert!(QueryOutcome::EmptyQuery.message().is_some());
    }

    #[test]
    fn unknown_message_upper_cases_term() {
        let outcome = QueryOutcome::UnknownTerm { term: "zebra".into() };
        assert_eq!(outcome.message().unwrap(), "Term ZEBRA does not exist in our word list.");
    }
}
