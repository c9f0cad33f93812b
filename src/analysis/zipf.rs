// Rarity scoring — zipf-scale frequency transforms.
//
// The zipf scale maps word frequencies onto a roughly 0-8 logarithmic scale
// where common words score high ("the" ~7.7) and rare words score low. It
// makes in-corpus usage and general-language usage directly comparable.

/// Sentinel returned for frequencies that have no defined zipf score.
///
/// The smallest positive normal f64 — far below any real zipf score, so
/// sentinel rows always sort to the bottom of a rarity-ordered table.
pub const SMALLEST_POSITIVE: f64 = f64::MIN_POSITIVE;

/// Map a frequency in (0, 1] to the zipf scale: `log10(freq) + 9`.
///
/// A frequency of 1e-9 (one occurrence per billion words) scores 0; a
/// frequency of 0.1 scores 8. Zero, negative, or non-finite input returns
/// [`SMALLEST_POSITIVE`] instead of failing.
pub fn zipf(freq: f64) -> f64 {
    if freq > 0.0 && freq.is_finite() {
        freq.log10() + 9.0
    } else {
        SMALLEST_POSITIVE
    }
}

/// Normalized difference between in-corpus and reference frequency.
///
/// Positive when the corpus uses the word more than general language,
/// negative when less. Callers must filter out `reference == 0` rows
/// before calling — zero-reference words have no meaningful delta.
pub fn freq_delta(relative: f64, reference: f64) -> f64 {
    (relative - reference) / reference
}
