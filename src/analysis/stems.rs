// Stem aggregation — collapse inflected variants into one row per root.
//
// "excavation", "excavations", and "excavate" tell the same story about a
// channel's vocabulary; grouping by Snowball stem (and class) makes that
// visible. Counts are summed, but the group's reference score is the median
// member zipf — a stem's typical rarity is better represented by its middle
// member than by an inflation-prone sum. That sum/median asymmetry is
// intentional; do not harmonize it.

use std::collections::HashMap;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

use super::rank::{assign_category_ranks, assign_global_ranks};
use super::tokenize::WordClass;
use super::words::WordRecord;
use super::zipf::zipf;

/// One row of the stem table. `word` holds the surface forms that were
/// collapsed into this group, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StemRecord {
    pub rank: u32,
    pub type_rank: u32,
    pub stem: String,
    #[serde(rename = "type")]
    pub word_class: WordClass,
    pub word: Vec<String>,
    pub count: u64,
    /// Median member reference score (zipf scale).
    pub word_freq: f64,
    /// Aggregated in-corpus relative frequency (zipf scale).
    pub relative_freq: f64,
    /// Normalized delta between the two zipf scores above.
    pub freq_delta: f64,
}

/// Stem table plus its corpus-level summary statistic.
pub struct StemAnalysis {
    pub records: Vec<StemRecord>,
    /// Mean absolute freq_delta across all stem groups — how far the
    /// channel's vocabulary sits from general language overall. None when
    /// the table is empty.
    pub unusuality_index: Option<f64>,
}

struct StemGroup {
    count: u64,
    words: Vec<String>,
    member_zipfs: Vec<f64>,
}

/// Collapse a ranked word table into a ranked stem table.
///
/// Groups by (stem, class) in first-seen order, sums raw counts, recomputes
/// the relative frequency against the new grand total, takes the median
/// member `word_freq`, and recomputes the delta from those two zipf values.
/// Rows are then ordered by count descending (stable) and re-ranked.
pub fn collect_stems(words: &[WordRecord]) -> StemAnalysis {
    let stemmer = Stemmer::create(Algorithm::English);

    let mut order: Vec<(String, WordClass)> = Vec::new();
    let mut groups: HashMap<(String, WordClass), StemGroup> = HashMap::new();

    for record in words {
        let stem = stemmer.stem(&record.word).to_string();
        let key = (stem, record.word_class);
        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            StemGroup {
                count: 0,
                words: Vec::new(),
                member_zipfs: Vec::new(),
            }
        });
        group.count += record.count;
        group.words.push(record.word.clone());
        group.member_zipfs.push(record.word_freq);
    }

    let total: u64 = groups.values().map(|g| g.count).sum();

    let mut records: Vec<StemRecord> = order
        .into_iter()
        .filter_map(|key| {
            let group = groups.remove(&key)?;
            let (stem, word_class) = key;

            let relative_freq = zipf(group.count as f64 / total as f64);
            let word_freq = median(&group.member_zipfs);
            // Unlike the word table, both operands here live on the zipf
            // scale already.
            let freq_delta = (relative_freq - word_freq) / word_freq;

            Some(StemRecord {
                rank: 0,
                type_rank: 0,
                stem,
                word_class,
                word: group.words,
                count: group.count,
                word_freq,
                relative_freq,
                freq_delta,
            })
        })
        .collect();

    records.sort_by(|a, b| b.count.cmp(&a.count));
    assign_global_ranks(&mut records, |r, rank| r.rank = rank);
    assign_category_ranks(&mut records, |r| r.word_class, |r, rank| r.type_rank = rank);

    let unusuality_index = if records.is_empty() {
        None
    } else {
        Some(records.iter().map(|r| r.freq_delta.abs()).sum::<f64>() / records.len() as f64)
    };

    StemAnalysis {
        records,
        unusuality_index,
    }
}

/// Median of a non-empty slice; the mean of the two middle values when the
/// length is even.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_variants_collapse_with_summed_count_and_median_reference() {
        let words = vec![
            word_record("running", WordClass::Verb, 5, 3.0),
            word_record("run", WordClass::Verb, 3, 3.4),
        ];
        let analysis = collect_stems(&words);
        assert_eq!(analysis.records.len(), 1);

        let group = &analysis.records[0];
        assert_eq!(group.stem, "run");
        assert_eq!(group.count, 8);
        assert_eq!(group.word, vec!["running".to_string(), "run".to_string()]);
        // Median of {3.0, 3.4} is their mean, not the sum of anything
        assert!((group.word_freq - 3.2).abs() < 1e-10);
    }

    #[test]
    fn test_same_stem_different_class_stays_separate() {
        let words = vec![
            word_record("dig", WordClass::Verb, 4, 3.0),
            word_record("dig", WordClass::Noun, 2, 3.0),
        ];
        let analysis = collect_stems(&words);
        assert_eq!(analysis.records.len(), 2);
    }

    #[test]
    fn test_stemming_is_idempotent_on_canonical_stems() {
        let stemmer = Stemmer::create(Algorithm::English);
        for word in ["run", "fox", "castl", "excav"] {
            let once = stemmer.stem(word).to_string();
            let twice = stemmer.stem(&once).to_string();
            assert_eq!(once, twice, "stem of '{word}' is not idempotent");
        }
    }

    #[test]
    fn test_rows_ordered_by_count_with_dense_ranks() {
        let words = vec![
            word_record("rare", WordClass::Adjective, 1, 2.0),
            word_record("castle", WordClass::Noun, 7, 4.0),
            word_record("ditch", WordClass::Noun, 3, 3.5),
        ];
        let analysis = collect_stems(&words);
        let counts: Vec<u64> = analysis.records.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![7, 3, 1]);
        let ranks: Vec<u32> = analysis.records.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        // Two nouns share the class, ranked 1 and 2 within it
        assert_eq!(analysis.records[0].type_rank, 1);
        assert_eq!(analysis.records[1].type_rank, 2);
        assert_eq!(analysis.records[2].type_rank, 1);
    }

    #[test]
    fn test_empty_input_reports_undefined_index() {
        let analysis = collect_stems(&[]);
        assert!(analysis.records.is_empty());
        assert!(analysis.unusuality_index.is_none());
    }

    #[test]
    fn test_unusuality_index_is_mean_absolute_delta() {
        let words = vec![
            word_record("castle", WordClass::Noun, 6, 4.0),
            word_record("ditch", WordClass::Noun, 2, 3.0),
        ];
        let analysis = collect_stems(&words);
        let expected = analysis
            .records
            .iter()
            .map(|r| r.freq_delta.abs())
            .sum::<f64>()
            / analysis.records.len() as f64;
        assert!((analysis.unusuality_index.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[3.0, 3.4]), 3.2);
        assert_eq!(median(&[1.0, 9.0, 2.0]), 2.0);
    }
}
