// Phrase extraction — fixed-length n-gram counting with junk filtering.
//
// Windows slide over each video's token stream independently (phrases never
// straddle two videos) while counts aggregate across the whole corpus. The
// phrase tuple drives equality and counting; the space-joined string is only
// the output form.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::counter::FrequencyCounter;
use super::rank::assign_global_ranks;
use super::tokenize::Token;
use super::zipf::zipf;

/// One row of a phrase table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseRecord {
    pub rank: u32,
    pub phrase_len: u32,
    pub phrase: String,
    pub count: u64,
    /// In-corpus relative frequency (zipf scale), measured against the
    /// pre-filter phrase total.
    pub relative_freq: f64,
}

/// A phrase is junk when any token is a lone punctuation character, or when
/// stopwords fill the entire window (`stopword_count >= len`).
///
/// The cutoff is the full window length, not half of it: a window survives
/// as long as a single non-stopword appears anywhere in it.
pub fn phrase_is_bad(phrase: &[String], stopwords: &HashSet<String>) -> bool {
    let mut stopword_count = 0;
    for word in phrase {
        if word.chars().count() == 1
            && word.chars().next().is_some_and(|c| c.is_ascii_punctuation())
        {
            return true;
        }
        if stopwords.contains(word) {
            stopword_count += 1;
        }
    }
    stopword_count >= phrase.len()
}

/// Count all phrases of exactly `phrase_len` tokens across the corpus.
///
/// Rows are ordered by count descending (stable), junk phrases filtered out,
/// and the survivors ranked densely. The relative-frequency denominator is
/// the total of all candidate windows, including the filtered ones — the
/// filter trims the table, not the corpus.
pub fn count_phrases(
    videos: &[Vec<Token>],
    phrase_len: usize,
    stopwords: &HashSet<String>,
) -> Vec<PhraseRecord> {
    if phrase_len == 0 {
        return Vec::new();
    }

    let mut counter: FrequencyCounter<Vec<String>> = FrequencyCounter::new();

    for tokens in videos {
        for window in tokens.windows(phrase_len) {
            counter.add(window.iter().map(|t| t.word.clone()).collect());
        }
    }

    let total = counter.total();
    if total == 0 {
        return Vec::new();
    }

    let mut records = Vec::new();
    for (phrase, count) in counter.most_common() {
        if phrase_is_bad(&phrase, stopwords) {
            continue;
        }
        records.push(PhraseRecord {
            rank: 0,
            phrase_len: phrase_len as u32,
            phrase: phrase.join(" "),
            count,
            relative_freq: zipf(count as f64 / total as f64),
        });
    }

    assign_global_ranks(&mut records, |r, rank| r.rank = rank);
    records
}

/// Merge the per-length phrase tables into one globally ranked table.
///
/// Tables are concatenated as given, stable-sorted by relative frequency
/// descending, and re-ranked. Phrases of different lengths are distinct
/// items even when one contains the other — no cross-length dedup.
pub fn aggregate_phrases(tables: &[Vec<PhraseRecord>]) -> Vec<PhraseRecord> {
    let mut merged: Vec<PhraseRecord> = tables.iter().flatten().cloned().collect();
    merged.sort_by(|a, b| {
        b.relative_freq
            .partial_cmp(&a.relative_freq)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    assign_global_ranks(&mut merged, |r, rank| r.rank = rank);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenize::tokenize;

    fn stopwords() -> HashSet<String> {
        ["the".to_string(), "of".to_string(), "a".to_string()]
            .into_iter()
            .collect()
    }

    fn phrase(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_one_stopword_in_three_is_kept() {
        // stopword_count 1 < len 3, so the phrase survives
        assert!(!phrase_is_bad(&phrase(&["the", "quick", "brown"]), &stopwords()));
    }

    #[test]
    fn test_all_stopwords_is_dropped() {
        assert!(phrase_is_bad(&phrase(&["the", "of", "a"]), &stopwords()));
    }

    #[test]
    fn test_lone_punctuation_token_is_dropped() {
        assert!(phrase_is_bad(&phrase(&["quick", ",", "brown"]), &stopwords()));
    }

    #[test]
    fn test_windows_do_not_cross_videos() {
        let videos = vec![tokenize("hill fort"), tokenize("ditch rampart")];
        let records = count_phrases(&videos, 2, &stopwords());
        let phrases: Vec<&str> = records.iter().map(|r| r.phrase.as_str()).collect();
        assert!(phrases.contains(&"hill fort"));
        assert!(phrases.contains(&"ditch rampart"));
        assert!(!phrases.contains(&"fort ditch"));
    }

    #[test]
    fn test_counts_aggregate_across_videos() {
        let videos = vec![tokenize("hill fort ditch"), tokenize("hill fort rampart")];
        let records = count_phrases(&videos, 2, &stopwords());
        let top = &records[0];
        assert_eq!(top.phrase, "hill fort");
        assert_eq!(top.count, 2);
        assert_eq!(top.rank, 1);
    }

    #[test]
    fn test_denominator_includes_filtered_windows() {
        // "the of" is filtered but still contributes to the total: the kept
        // phrase "hill fort" has raw relative frequency 1/3, not 1/1.
        let videos = vec![tokenize("the of hill fort")];
        let records = count_phrases(&videos, 2, &stopwords());
        let kept = records.iter().find(|r| r.phrase == "hill fort").unwrap();
        let raw = 10f64.powf(kept.relative_freq - 9.0);
        assert!((raw - 1.0 / 3.0).abs() < 1e-9, "raw relative freq was {raw}");
    }

    #[test]
    fn test_aggregation_keeps_every_row_and_reranks() {
        let videos = vec![tokenize("hill fort ditch rampart causeway")];
        let tables: Vec<Vec<PhraseRecord>> = (2..=4)
            .map(|n| count_phrases(&videos, n, &stopwords()))
            .collect();
        let input_len: usize = tables.iter().map(|t| t.len()).sum();

        let merged = aggregate_phrases(&tables);
        assert_eq!(merged.len(), input_len);
        for (i, record) in merged.iter().enumerate() {
            assert_eq!(record.rank, i as u32 + 1);
        }
        for pair in merged.windows(2) {
            assert!(pair[0].relative_freq >= pair[1].relative_freq);
        }
    }

    #[test]
    fn test_short_corpus_yields_empty_table() {
        let videos = vec![tokenize("hello")];
        assert!(count_phrases(&videos, 3, &stopwords()).is_empty());
    }
}
