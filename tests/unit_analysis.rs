// Unit tests for the frequency-aggregation core.
//
// Exercises the pure pipeline pieces end to end at module granularity:
// tokenizer determinism, counting with stopwords, rarity scoring edge
// cases, stem aggregation policy, phrase filtering, and rank density.

use std::collections::HashSet;

use lexiscope::analysis::lexicon::ReferenceLexicon;
use lexiscope::analysis::phrases::{aggregate_phrases, count_phrases, phrase_is_bad};
use lexiscope::analysis::stems::collect_stems;
use lexiscope::analysis::tokenize::{tokenize, WordClass};
use lexiscope::analysis::words::{count_words, WordRecord};
use lexiscope::analysis::zipf::{zipf, SMALLEST_POSITIVE};

fn stopwords(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

// ============================================================
// Tokenizer — determinism and normalization
// ============================================================

#[test]
fn tokenizer_is_deterministic() {
    let text = "The QUICK brown fox, jumping over 12 lazy dogs... again!";
    let first = tokenize(text);
    let second = tokenize(text);
    assert_eq!(first, second);
}

#[test]
fn tokenizer_keeps_punctuation_as_own_tokens() {
    let tokens = tokenize("wait, what?");
    let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
    assert_eq!(words, vec!["wait", ",", "what", "?"]);
    assert_eq!(tokens[1].class, WordClass::Punctuation);
    assert_eq!(tokens[3].class, WordClass::Punctuation);
}

#[test]
fn tokenizer_survives_empty_and_junk_input() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("  \t  ").is_empty());
    // Pure symbol soup still tokenizes, it just tags everything punctuation
    assert!(tokenize("!!??")
        .iter()
        .all(|t| t.class == WordClass::Punctuation));
}

// ============================================================
// Word counting — the two-video scenario
// ============================================================

#[test]
fn two_video_corpus_counts_fox_twice_and_drops_the() {
    let videos = vec![
        tokenize("the quick brown fox"),
        tokenize("the lazy fox jumps"),
    ];
    let lexicon = ReferenceLexicon::from_entries([
        ("quick", 1e-5),
        ("brown", 1e-5),
        ("fox", 2e-6),
        ("lazy", 3e-6),
        ("jumps", 4e-6),
        ("the", 0.05),
    ]);

    let words = count_words(&videos, &lexicon, &stopwords(&["the"]), 8.0);

    let fox = words.iter().find(|r| r.word == "fox").unwrap();
    assert_eq!(fox.count, 2);
    assert!(words.iter().all(|r| r.word != "the"));

    // Rank 1 goes to the highest-count non-stopword
    assert_eq!(words[0].word, "fox");
    assert_eq!(words[0].rank, 1);
}

#[test]
fn relative_frequencies_sum_to_one_before_trimming() {
    let videos = vec![tokenize("hill fort ditch ditch rampart hill hill")];
    let lexicon = ReferenceLexicon::from_entries([
        ("hill", 1e-5),
        ("fort", 1e-5),
        ("ditch", 1e-6),
        ("rampart", 1e-7),
    ]);

    // No stopwords and no ceiling: nothing is trimmed
    let words = count_words(&videos, &lexicon, &HashSet::new(), f64::INFINITY);
    let sum: f64 = words.iter().map(|r| 10f64.powf(r.relative_freq - 9.0)).sum();
    assert!((sum - 1.0).abs() < 1e-9, "Relative frequencies sum to {sum}");
}

#[test]
fn ranks_are_dense_permutations_starting_at_one() {
    let videos = vec![tokenize(
        "castle ditch rampart castle hill ditch motte bailey keep",
    )];
    let lexicon = ReferenceLexicon::from_entries([
        ("castle", 1e-5),
        ("ditch", 1e-5),
        ("rampart", 1e-6),
        ("hill", 1e-5),
        ("motte", 1e-8),
        ("bailey", 1e-7),
        ("keep", 1e-5),
    ]);

    let words = count_words(&videos, &lexicon, &HashSet::new(), 8.0);
    assert!(!words.is_empty());

    for (i, record) in words.iter().enumerate() {
        assert_eq!(record.rank, i as u32 + 1, "Global rank has a gap");
    }

    // Per-class ranks are dense within each class subset
    let classes: HashSet<WordClass> = words.iter().map(|r| r.word_class).collect();
    for class in classes {
        let subset: Vec<&WordRecord> = words.iter().filter(|r| r.word_class == class).collect();
        for (i, record) in subset.iter().enumerate() {
            assert_eq!(record.type_rank, i as u32 + 1, "Class rank has a gap");
        }
    }
}

// ============================================================
// Rarity scoring — sentinel path
// ============================================================

#[test]
fn zero_reference_word_gets_sentinel_score_and_no_delta_row() {
    // The scorer itself never fails on zero
    assert_eq!(zipf(0.0), SMALLEST_POSITIVE);

    // And the word table excludes the zero-reference word entirely,
    // so no delta is ever computed for it
    let videos = vec![tokenize("zorblax fox")];
    let lexicon = ReferenceLexicon::from_entries([("fox", 2e-6)]);
    let words = count_words(&videos, &lexicon, &HashSet::new(), 8.0);

    assert!(words.iter().all(|r| r.word != "zorblax"));
    assert_eq!(words.len(), 1);
}

#[test]
fn sentinel_sorts_below_every_real_score() {
    for freq in [1e-12, 1e-9, 1e-6, 0.1, 1.0] {
        assert!(SMALLEST_POSITIVE < zipf(freq));
    }
}

// ============================================================
// Stem aggregation — sum counts, median reference
// ============================================================

fn word_record(word: &str, class: WordClass, count: u64, word_freq: f64) -> WordRecord {
    WordRecord {
        rank: 0,
        type_rank: 0,
        word: word.to_string(),
        word_class: class,
        count,
        word_freq,
        relative_freq: 0.0,
        freq_delta: 0.0,
    }
}

#[test]
fn running_and_run_collapse_to_count_eight_median_three_point_two() {
    let words = vec![
        word_record("running", WordClass::Verb, 5, 3.0),
        word_record("run", WordClass::Verb, 3, 3.4),
    ];

    let analysis = collect_stems(&words);
    assert_eq!(analysis.records.len(), 1);

    let group = &analysis.records[0];
    assert_eq!(group.stem, "run");
    assert_eq!(group.count, 8);
    assert!(
        (group.word_freq - 3.2).abs() < 1e-10,
        "Expected median 3.2, got {}",
        group.word_freq
    );
    // Both surface forms are kept
    assert_eq!(group.word, vec!["running".to_string(), "run".to_string()]);
}

#[test]
fn unusuality_index_undefined_for_empty_table() {
    let analysis = collect_stems(&[]);
    assert!(analysis.unusuality_index.is_none());
}

// ============================================================
// Phrase extraction — literal stopword threshold and punctuation
// ============================================================

#[test]
fn one_stopword_of_three_keeps_the_phrase() {
    let videos = vec![tokenize("the quick brown fox jumps")];
    let phrases = count_phrases(&videos, 3, &stopwords(&["the"]));

    let kept: Vec<&str> = phrases.iter().map(|r| r.phrase.as_str()).collect();
    // stopword_count 1 < 3, so the window survives
    assert!(kept.contains(&"the quick brown"), "kept: {kept:?}");
}

#[test]
fn phrase_with_lone_punctuation_token_is_dropped() {
    let videos = vec![tokenize("quick, brown")];
    let phrases = count_phrases(&videos, 3, &HashSet::new());
    assert!(
        phrases.is_empty(),
        "The only 3-window contains a comma token and must be dropped"
    );
}

#[test]
fn all_stopword_window_is_dropped() {
    assert!(phrase_is_bad(
        &["of".to_string(), "the".to_string()],
        &stopwords(&["of", "the"])
    ));
}

// ============================================================
// Multi-length aggregation — no cross-N dedup
// ============================================================

#[test]
fn aggregated_table_length_is_sum_of_inputs() {
    let videos = vec![
        tokenize("hill fort ditch rampart causeway enclosure"),
        tokenize("hill fort earthwork survey"),
    ];
    let none = HashSet::new();

    let tables: Vec<_> = (2..=4).map(|n| count_phrases(&videos, n, &none)).collect();
    let input_len: usize = tables.iter().map(|t| t.len()).sum();

    let merged = aggregate_phrases(&tables);
    assert_eq!(merged.len(), input_len);

    // Re-ranked densely and sorted by relative frequency descending
    for (i, record) in merged.iter().enumerate() {
        assert_eq!(record.rank, i as u32 + 1);
    }
    for pair in merged.windows(2) {
        assert!(pair[0].relative_freq >= pair[1].relative_freq);
    }

    // A 2-gram contained in a 3-gram still appears separately
    assert!(merged.iter().any(|r| r.phrase == "hill fort"));
    assert!(merged.iter().any(|r| r.phrase.starts_with("hill fort ")));
}
