// Insertion-ordered frequency counter.
//
// The enumeration order of `most_common` is part of the output contract:
// downstream rank assignment depends on it, so ties cannot be left to hash
// map iteration order. Items are remembered in first-insertion order and a
// stable sort on count keeps that order for equal counts.

use std::collections::HashMap;
use std::hash::Hash;

/// Accumulating counter over any hashable item type (words, stems, phrases).
///
/// One counter is shared across a whole corpus — call `add` for every
/// occurrence in every transcript and read the totals at the end.
pub struct FrequencyCounter<K> {
    counts: HashMap<K, u64>,
    order: Vec<K>,
    total: u64,
}

impl<K: Eq + Hash + Clone> FrequencyCounter<K> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            order: Vec::new(),
            total: 0,
        }
    }

    /// Count one occurrence of `item`.
    pub fn add(&mut self, item: K) {
        self.total += 1;
        match self.counts.get_mut(&item) {
            Some(count) => *count += 1,
            None => {
                self.order.push(item.clone());
                self.counts.insert(item, 1);
            }
        }
    }

    /// Total occurrences counted, including duplicates.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct items seen.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All distinct items with counts, descending by count.
    ///
    /// Ties keep first-insertion order (stable sort over the insertion
    /// sequence), so repeated runs over the same input enumerate identically.
    pub fn most_common(&self) -> Vec<(K, u64)> {
        let mut entries: Vec<(K, u64)> = self
            .order
            .iter()
            .map(|item| (item.clone(), self.counts[item]))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl<K: Eq + Hash + Clone> Default for FrequencyCounter<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_total() {
        let mut counter = FrequencyCounter::new();
        for word in ["fox", "the", "fox", "jumps"] {
            counter.add(word);
        }
        assert_eq!(counter.total(), 4);
        assert_eq!(counter.len(), 3);
        assert_eq!(counter.most_common()[0], ("fox", 2));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut counter = FrequencyCounter::new();
        for word in ["beta", "alpha", "beta", "alpha", "gamma"] {
            counter.add(word);
        }
        let common = counter.most_common();
        // beta and alpha tie at 2; beta was inserted first
        assert_eq!(common[0], ("beta", 2));
        assert_eq!(common[1], ("alpha", 2));
        assert_eq!(common[2], ("gamma", 1));
    }

    #[test]
    fn test_empty_counter() {
        let counter: FrequencyCounter<String> = FrequencyCounter::new();
        assert!(counter.is_empty());
        assert_eq!(counter.total(), 0);
        assert!(counter.most_common().is_empty());
    }
}
