// Word-frequency table construction.
//
// Counts (word, class) pairs across the whole corpus, scores each surviving
// word against the reference lexicon, and ranks the result. Stopwords and
// punctuation never enter the counter; words the reference lexicon has never
// seen, and words too ubiquitous to be interesting, are trimmed afterward.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::counter::FrequencyCounter;
use super::lexicon::ReferenceLexicon;
use super::rank::{assign_category_ranks, assign_global_ranks};
use super::tokenize::{Token, WordClass};
use super::zipf::{freq_delta, zipf};

/// Reference-zipf ceiling above which a word is considered too common to
/// keep. 5.5 on the zipf scale is roughly one occurrence per 3,000 words.
pub const DEFAULT_MAX_REFERENCE_ZIPF: f64 = 5.5;

/// One row of the word table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub rank: u32,
    pub type_rank: u32,
    pub word: String,
    #[serde(rename = "type")]
    pub word_class: WordClass,
    pub count: u64,
    /// Reference-corpus frequency on the zipf scale.
    pub word_freq: f64,
    /// In-corpus relative frequency on the zipf scale.
    pub relative_freq: f64,
    /// Normalized raw-frequency delta: (relative - reference) / reference.
    pub freq_delta: f64,
}

/// Build the ranked word table for a tokenized corpus.
///
/// `videos` holds one token stream per video. Rows are ordered by count
/// descending (ties by first occurrence), then trimmed: words missing from
/// the lexicon are dropped (no rarity baseline means no delta), as are words
/// whose reference zipf is at or above `max_reference_zipf`. Ranks are dense
/// over the surviving rows.
pub fn count_words(
    videos: &[Vec<Token>],
    lexicon: &ReferenceLexicon,
    stopwords: &HashSet<String>,
    max_reference_zipf: f64,
) -> Vec<WordRecord> {
    let mut counter: FrequencyCounter<(String, WordClass)> = FrequencyCounter::new();

    for tokens in videos {
        for token in tokens {
            if token.class == WordClass::Punctuation || stopwords.contains(&token.word) {
                continue;
            }
            counter.add((token.word.clone(), token.class));
        }
    }

    let total = counter.total();
    if total == 0 {
        return Vec::new();
    }

    let mut records = Vec::new();
    for ((word, word_class), count) in counter.most_common() {
        let reference = lexicon.lookup(&word);
        if reference <= 0.0 {
            continue;
        }
        let reference_zipf = zipf(reference);
        if reference_zipf >= max_reference_zipf {
            continue;
        }

        // The delta is computed on raw frequencies; only the two frequency
        // columns are stored on the zipf scale.
        let relative = count as f64 / total as f64;
        records.push(WordRecord {
            rank: 0,
            type_rank: 0,
            word,
            word_class,
            count,
            word_freq: reference_zipf,
            relative_freq: zipf(relative),
            freq_delta: freq_delta(relative, reference),
        });
    }

    assign_global_ranks(&mut records, |r, rank| r.rank = rank);
    assign_category_ranks(&mut records, |r| r.word_class, |r, rank| r.type_rank = rank);

    records
}
