use invert_core::corpus::MemoryCorpus;
use invert_core::{evaluate, EngineConfig, InvertedIndex, QueryOutcome, SnippetExtractor, Stoplist};

fn cats_and_dogs() -> (InvertedIndex, MemoryCorpus) {
    let corpus: MemoryCorpus = [("doc1", "the cat sat"), ("doc2", "the dog ran")].into_iter().collect();
    let stoplist: Stoplist = ["the"].into_iter().collect();
    let index = corpus.build_index(stoplist);
    (index, corpus)
}

fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

#[test]
fn single_term_reports_tf_and_idf() {
    let (index, _) = cats_and_dogs();
    let QueryOutcome::SingleTerm(report) = evaluate(&index, "cat") else {
        panic!("expected a single-term report");
    };
    assert!(close(report.idf, 1.0 + 2f64.log10()));
    assert_eq!(report.hits.len(), 1);
    let hit = &report.hits[0];
    assert_eq!(hit.document, "doc1");
    assert_eq!(hit.positions, vec![1]);
    assert!(close(hit.tf, 1.0));
    assert!(close(hit.tf_idf, 1.301_029_995_663_981));
}

#[test]
fn single_term_lists_documents_by_name() {
    let corpus: MemoryCorpus = [("zeta", "fox fox"), ("alpha", "fox"), ("mid", "hen")].into_iter().collect();
    let index = corpus.build_index(Stoplist::new());
    let QueryOutcome::SingleTerm(report) = evaluate(&index, "FOX") else {
        panic!("expected a single-term report");
    };
    let names: Vec<&str> = report.hits.iter().map(|h| h.document.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[test]
fn disjoint_terms_do_not_match() {
    let (index, _) = cats_and_dogs();
    assert!(matches!(evaluate(&index, "cat dog"), QueryOutcome::NoMatch { .. }));
}

#[test]
fn conjunctive_query_ranks_matching_documents() {
    let (index, _) = cats_and_dogs();
    let QueryOutcome::Ranked { hits, .. } = evaluate(&index, "cat sat") else {
        panic!("expected ranked hits");
    };
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document, "doc1");
    assert!(close(hits[0].score, 2.0 * (1.0 + 2f64.log10())));
}

#[test]
fn ranking_is_descending_with_name_tie_break() {
    let corpus: MemoryCorpus = [
        ("c", "red blue"),
        ("a", "red blue"),
        ("b", "red red red blue"),
        ("d", "red"),
    ]
    .into_iter()
    .collect();
    let index = corpus.build_index(Stoplist::new());
    let QueryOutcome::Ranked { hits, .. } = evaluate(&index, "red blue") else {
        panic!("expected ranked hits");
    };
    let order: Vec<&str> = hits.iter().map(|h| h.document.as_str()).collect();
    assert_eq!(order, vec!["b", "a", "c"]);
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn stop_words_are_reported_distinctly() {
    let (index, _) = cats_and_dogs();
    assert_eq!(evaluate(&index, "The"), QueryOutcome::StopWord { term: "The".into() });
    assert_eq!(evaluate(&index, "zebra"), QueryOutcome::UnknownTerm { term: "zebra".into() });
    assert_eq!(evaluate(&index, "the THE"), QueryOutcome::AllStopWords);
}

#[test]
fn stop_words_are_dropped_before_matching() {
    let (index, _) = cats_and_dogs();
    assert!(matches!(evaluate(&index, "the cat"), QueryOutcome::SingleTerm(ref r) if r.term == "cat"));
}

#[test]
fn partially_known_queries_are_refused() {
    let (index, _) = cats_and_dogs();
    assert_eq!(
        evaluate(&index, "cat zebra"),
        QueryOutcome::SomeTermsUnknown { unknown: vec!["zebra".into()] }
    );
    assert!(matches!(evaluate(&index, "zebra yak"), QueryOutcome::NoTermsKnown { .. }));
}

#[test]
fn document_frequency_matches_postings() {
    let corpus: MemoryCorpus = [("x", "a b a c"), ("y", "b c d"), ("z", "a")].into_iter().collect();
    let index = corpus.build_index(Stoplist::new());
    for (term, df) in index.word_list() {
        let documents = index.documents().filter(|d| index.positions(term, &d.name).is_some()).count();
        assert_eq!(df as usize, documents, "df for {term}");
        assert_eq!(index.document_frequency(term), df);
    }
    assert_eq!(index.document_frequency("nope"), 0);
    assert_eq!(index.idf("nope"), None);
}

#[test]
fn snippet_for_single_term_hit() {
    let (index, corpus) = cats_and_dogs();
    let extractor = SnippetExtractor::new(&index, &corpus, &EngineConfig::default());
    assert_eq!(extractor.snippet("cat", "doc1").unwrap(), vec!["the", "cat", "sat"]);
}
