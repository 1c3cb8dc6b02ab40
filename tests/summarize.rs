//! End-to-end behaviour of the public summarization API.

use rapid_summarize::nlp::normalizer::normalize;
use rapid_summarize::pipeline::spec::SummarySpec;
use rapid_summarize::{summarize, SummarizeError, Summarizer, SummarizerConfig, SummaryBudget};

const CLAIM: &str = "
I was driving down El Camino and stopped at a red light.
It was about 3pm in the afternoon.
The sun was bright and shining just behind the stoplight.
This made it hard to see the lights.
There was a car on my left in the left turn lane.
A few moments later another car, a black sedan pulled up behind me.
When the left turn light changed green, the black sedan hit me thinking
that the light had changed for us, but I had not moved because the light
was still red.
After hitting my car, the black sedan backed up and then sped past me.
I did manage to catch its license plate.
The license plate of the black sedan was ABC123.
";

#[test]
fn test_sentences_are_verbatim_substrings_of_normalized_input() {
    let normalized = normalize(CLAIM);
    for words in [5, 30, 60, 500] {
        let out = summarize(CLAIM, Some(words), None).unwrap();
        assert!(!out.is_empty());
        for sentence in &out {
            assert!(normalized.contains(sentence.as_str()), "{sentence:?}");
            assert_eq!(sentence.trim(), sentence);
            assert!(!sentence.contains('\n'));
        }
    }
}

#[test]
fn test_summary_is_in_document_order() {
    let summarizer = Summarizer::new();
    for budget in [
        SummaryBudget::WordCount(30),
        SummaryBudget::WordCount(70),
        SummaryBudget::Ratio(0.5),
        SummaryBudget::Ratio(1.0),
    ] {
        let summary = summarizer.summarize(CLAIM, budget).unwrap();
        let positions: Vec<usize> = summary.sentences.iter().map(|s| s.sentence.start).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}

#[test]
fn test_single_sentence_document() {
    let out = summarize("  The license plate was ABC123.  ", None, None).unwrap();
    assert_eq!(out, vec!["The license plate was ABC123."]);

    let out = summarize("no punctuation at all", Some(1), None).unwrap();
    assert_eq!(out, vec!["no punctuation at all"]);
}

#[test]
fn test_empty_document() {
    for doc in ["", "   ", "\n\n", " \t\r\n "] {
        assert!(summarize(doc, None, None).unwrap().is_empty());
        assert!(summarize(doc, None, Some(0.5)).unwrap().is_empty());
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let once = normalize(CLAIM).into_owned();
    let twice = normalize(&once).into_owned();
    assert_eq!(once, twice);
}

#[test]
fn test_word_count_is_monotone() {
    let mut previous = 0;
    for words in 1..=200 {
        let count = summarize(CLAIM, Some(words), None).unwrap().len();
        assert!(count >= previous, "{words} words gave {count} < {previous}");
        previous = count;
    }
    assert_eq!(previous, 10);
}

#[test]
fn test_three_one_word_sentences() {
    let out = summarize("A. B. C.", Some(1), None).unwrap();
    assert!(!out.is_empty());
    assert!(out.len() <= 2);
    for sentence in &out {
        assert!(["A.", "B.", "C."].contains(&sentence.as_str()));
    }
}

#[test]
fn test_claim_description_stays_near_budget() {
    let summary = Summarizer::new()
        .summarize(CLAIM, SummaryBudget::WordCount(30))
        .unwrap();

    assert!(!summary.is_empty());
    assert!(summary.word_count <= 35, "{} words", summary.word_count);
    assert_eq!(summary.total_sentences, 10);
    assert!(
        summary.texts().iter().any(|s| s.contains("license plate")),
        "{:?}",
        summary.texts()
    );
}

#[test]
fn test_claim_ranking_favours_the_sedan() {
    let summary = Summarizer::new()
        .summarize(CLAIM, SummaryBudget::Ratio(1.0))
        .unwrap();

    let top = summary.sentences.iter().find(|s| s.rank == 1).unwrap();
    assert!(
        top.sentence.text.contains("license plate") || top.sentence.text.contains("sedan"),
        "{:?}",
        top.sentence.text
    );

    let filler = summary
        .sentences
        .iter()
        .find(|s| s.sentence.text == "It was about 3pm in the afternoon.")
        .unwrap();
    for sedan in summary.sentences.iter().filter(|s| s.sentence.text.contains("sedan")) {
        assert!(filler.rank > sedan.rank, "{:?}", sedan.sentence.text);
        assert!(filler.score < sedan.score);
    }
}

#[test]
fn test_ratio_keeps_the_sedan() {
    let out = summarize(CLAIM, None, Some(0.25)).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.iter().any(|s| s.contains("sedan")));
}

#[test]
fn test_word_count_takes_precedence() {
    let both = summarize(CLAIM, Some(12), Some(1.0)).unwrap();
    let words_only = summarize(CLAIM, Some(12), None).unwrap();
    assert_eq!(both, words_only);
}

#[test]
fn test_invalid_budgets_fail_before_work() {
    for (words, ratio) in [(Some(0), None), (None, Some(0.0)), (None, Some(1.01)), (Some(5), Some(-0.2))] {
        assert!(matches!(
            summarize(CLAIM, words, ratio),
            Err(SummarizeError::InvalidBudget(_))
        ));
    }
    assert!(matches!(
        summarize("", None, Some(f64::NAN)),
        Err(SummarizeError::InvalidBudget(_))
    ));
}

#[test]
fn test_scores_form_a_distribution() {
    let summary = Summarizer::new()
        .summarize(CLAIM, SummaryBudget::Ratio(1.0))
        .unwrap();

    let total: f64 = summary.sentences.iter().map(|s| s.score).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(summary.sentences.iter().all(|s| s.score.is_finite() && s.score > 0.0));

    let mut ranks: Vec<usize> = summary.sentences.iter().map(|s| s.rank).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
}

#[test]
fn test_deterministic_output() {
    let first = summarize(CLAIM, Some(30), None).unwrap();
    for _ in 0..5 {
        assert_eq!(summarize(CLAIM, Some(30), None).unwrap(), first);
    }
}

#[test]
fn test_no_shared_terms_falls_back_to_position() {
    let out = summarize(
        "Apples grow slowly. Trains depart hourly. Oceans shimmer brightly.",
        Some(3),
        None,
    )
    .unwrap();
    assert_eq!(out, vec!["Apples grow slowly."]);
}

#[test]
fn test_large_document_uses_parallel_graph() {
    let doc: String = (0..300)
        .map(|i| format!("Report {i} mentions the black sedan near the red light. "))
        .collect();
    let sequential = Summarizer::with_config(SummarizerConfig::default().with_parallel_threshold(usize::MAX))
        .unwrap()
        .summarize(&doc, SummaryBudget::Ratio(0.1))
        .unwrap();
    let parallel = Summarizer::with_config(SummarizerConfig::default().with_parallel_threshold(1))
        .unwrap()
        .summarize(&doc, SummaryBudget::Ratio(0.1))
        .unwrap();

    assert_eq!(sequential.texts(), parallel.texts());
    assert_eq!(parallel.len(), 30);
}

#[test]
fn test_spec_drives_summarizer() {
    let spec = SummarySpec::from_json(
        r#"{ "v": 1, "budget": { "ratio": 0.5 }, "stopwords": { "extra": ["sedan", "black"] } }"#,
    )
    .unwrap();
    let (cfg, budget) = spec.into_config().unwrap();

    let summary = Summarizer::with_config(cfg).unwrap().summarize(CLAIM, budget).unwrap();
    assert_eq!(summary.len(), 5);
    assert_eq!(summary.budget, SummaryBudget::Ratio(0.5));
}

#[test]
fn test_summary_serializes_to_json() {
    let summary = Summarizer::new()
        .summarize(CLAIM, SummaryBudget::WordCount(30))
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["budget"]["word_count"], 30);
    assert!(json["sentences"].as_array().is_some_and(|a| !a.is_empty()));
    assert!(json["sentences"][0]["sentence"]["text"].is_string());
}
