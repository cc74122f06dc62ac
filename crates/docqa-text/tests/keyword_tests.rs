use docqa_core::chunker::Chunker;
use docqa_core::types::Chunk;
use docqa_text::KeywordRetriever;

fn chunks(texts: &[&str]) -> Vec<Chunk> {
    texts.iter().enumerate().map(|(i, t)| Chunk { chunk_id: i, text: t.to_string() }).collect()
}

#[test]
fn methodology_question_finds_methodology_chunk_only() {
    let retriever = KeywordRetriever::with_default_top_n(chunks(&[
        "Our Methodology relies on stratified sampling.",
        "Results show a 12% increase in yield.",
    ]));
    let hits = retriever.retrieve("What is the methodology?");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].chunk_id, 0);
    assert!(hits[0].score >= 1.0);
}

#[test]
fn no_overlap_gives_empty_result() {
    let retriever = KeywordRetriever::with_default_top_n(chunks(&["Results show a 12% increase in yield."]));
    assert!(retriever.retrieve("Who funded it?").is_empty());
    assert!(retriever.retrieve("").is_empty());
}

#[test]
fn ranking_is_by_score_then_document_order() {
    let retriever = KeywordRetriever::with_default_top_n(chunks(&[
        "neural networks",
        "training neural networks with dropout",
        "dropout regularisation",
        "networks of roads",
    ]));
    let hits = retriever.retrieve("neural networks dropout");
    let order: Vec<usize> = hits.iter().map(|h| h.chunk_id).collect();
    assert_eq!(order, vec![1, 0, 2, 3]);
    assert_eq!(hits[0].score, 3.0);
    assert_eq!(hits[1].score, 2.0);
}

#[test]
fn result_count_is_capped() {
    let texts: Vec<String> = (0..12).map(|i| format!("sample {i} of the survey")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    assert_eq!(KeywordRetriever::with_default_top_n(chunks(&refs)).retrieve("survey").len(), 5);
    assert_eq!(KeywordRetriever::new(chunks(&refs), 2).retrieve("survey").len(), 2);
}

#[test]
fn works_on_chunker_output() {
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
    let retriever = KeywordRetriever::with_default_top_n(Chunker::new(4, 0).chunk(text));
    let hits = retriever.retrieve("kappa");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].chunk_id, 2);
    assert_eq!(hits[0].text, "iota kappa");
}
