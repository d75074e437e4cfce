//! Syllable boundary assignment: scored partition search.
//!
//! Given a word's flat phoneme sequence and its known syllable count N, every
//! way of splitting the sequence into N contiguous non-empty groups is
//! enumerated and scored against heuristics that compare each group to the
//! word's reference spelling. The best-scoring partition wins; ties keep the
//! first partition found, so results are reproducible bit-for-bit under fixed
//! weights.
//!
//! This is the only combinatorial search in the system (C(len-1, N-1)
//! partitions) and dominates preprocessing cost for long words.

use crate::core::config::PartitionConfig;
use crate::phonology::inventory;
use crate::phonology::phoneme::Phoneme;
use crate::phonology::syllable::Syllable;

/// Iterator over all ways to split `len` items into `groups` contiguous,
/// non-empty runs. Yields the start indices of groups `2..=N` (the first
/// group always starts at 0), in the same left-to-right order as the
/// recursive formulation:
///
/// ```text
/// abcd / 2 → a|bcd, ab|cd, abc|d
/// abcd / 3 → a|b|cd, a|bc|d, ab|c|d
/// ```
#[derive(Debug)]
pub struct Partitions {
    len: usize,
    groups: usize,
    boundaries: Vec<usize>,
    exhausted: bool,
}

impl Partitions {
    /// Create a partition iterator. Yields nothing when the split is
    /// impossible (`groups` of 0, or more groups than items).
    pub fn new(len: usize, groups: usize) -> Self {
        let exhausted = groups == 0 || groups > len;
        Self {
            len,
            groups,
            boundaries: Vec::new(),
            exhausted,
        }
    }
}

impl Iterator for Partitions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if self.boundaries.is_empty() && self.groups > 1 {
            // First partition: minimal boundaries 1, 2, ..., groups-1.
            self.boundaries = (1..self.groups).collect();
            return Some(self.boundaries.clone());
        }
        if self.groups == 1 {
            // Single group: the whole sequence, exactly once.
            self.exhausted = true;
            return Some(Vec::new());
        }

        // Odometer advance: bump the rightmost boundary that still has room,
        // then pack everything after it tight against it.
        let count = self.boundaries.len();
        let mut k = count;
        loop {
            if k == 0 {
                self.exhausted = true;
                return None;
            }
            k -= 1;
            let max_for_k = self.len - (count - k);
            if self.boundaries[k] < max_for_k {
                self.boundaries[k] += 1;
                for j in k + 1..count {
                    self.boundaries[j] = self.boundaries[k] + (j - k);
                }
                return Some(self.boundaries.clone());
            }
        }
    }
}

/// Slice a phoneme sequence into the groups described by boundary indices.
pub fn groups_from_boundaries<'p>(
    phonemes: &'p [Phoneme],
    boundaries: &[usize],
) -> Vec<&'p [Phoneme]> {
    let mut groups = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;
    for &boundary in boundaries {
        groups.push(&phonemes[start..boundary]);
        start = boundary;
    }
    groups.push(&phonemes[start..]);
    groups
}

/// Scores candidate partitions against the reference spelling heuristics.
pub struct PartitionScorer<'a> {
    config: &'a PartitionConfig,
}

impl<'a> PartitionScorer<'a> {
    /// Create a scorer over the given heuristic weights.
    pub fn new(config: &'a PartitionConfig) -> Self {
        Self { config }
    }

    /// Find the best split of `phonemes` into `reference_syllables.len()`
    /// groups. `marker_positions` holds phoneme indices that followed a
    /// stress/boundary marker in the source transcription.
    ///
    /// Returns `None` only when the split is impossible (empty transcription
    /// or more syllables than phonemes); otherwise some partition always
    /// wins, worst case a low-scoring one.
    pub fn best_partition(
        &self,
        phonemes: &[Phoneme],
        marker_positions: &[usize],
        reference_syllables: &[String],
    ) -> Option<Vec<Syllable>> {
        let groups = reference_syllables.len();
        if phonemes.is_empty() || groups == 0 || groups > phonemes.len() {
            return None;
        }
        if groups == 1 {
            return Some(vec![Syllable::new(phonemes.iter().copied().collect())]);
        }

        let mut best_boundaries: Option<Vec<usize>> = None;
        let mut best_score = f64::NEG_INFINITY;

        for boundaries in Partitions::new(phonemes.len(), groups) {
            let score = self.score_partition(
                phonemes,
                &boundaries,
                marker_positions,
                reference_syllables,
            );
            // Strict comparison keeps the first partition at the maximum.
            if score > best_score {
                best_score = score;
                best_boundaries = Some(boundaries);
            }
        }

        let boundaries = best_boundaries?;
        Some(
            groups_from_boundaries(phonemes, &boundaries)
                .into_iter()
                .map(|group| Syllable::new(group.iter().copied().collect()))
                .collect(),
        )
    }

    fn score_partition(
        &self,
        phonemes: &[Phoneme],
        boundaries: &[usize],
        marker_positions: &[usize],
        reference_syllables: &[String],
    ) -> f64 {
        let w = self.config;
        let groups = groups_from_boundaries(phonemes, boundaries);
        let mut score = 0.0;

        // Group starts that line up with source markers.
        score += std::iter::once(0)
            .chain(boundaries.iter().copied())
            .filter(|start| marker_positions.contains(start))
            .count() as f64
            * w.marker_alignment_bonus;

        for (index, group) in groups.iter().enumerate() {
            let reference = reference_syllables.get(index).map(String::as_str);

            if group.iter().all(|p| !p.is_vowel()) {
                score -= w.consonant_cluster_penalty;
            }

            if let Some(reference) = reference {
                let diff = group.len() as f64 - reference.chars().count() as f64;
                score -= w.length_mismatch_penalty * diff * diff;
            }

            if has_plausible_shape(group) {
                score += w.shape_bonus;
            }

            if let Some(reference) = reference {
                if consumes_reference(group, reference) {
                    score += w.correlate_full_bonus;
                }
                score += group
                    .iter()
                    .filter(|p| {
                        inventory::orthographic_correlates(p.as_str())
                            .iter()
                            .any(|c| reference.contains(c))
                    })
                    .count() as f64
                    * w.correlate_partial_bonus;
            }

            if group.len() == 1 && inventory::is_isolation_penalized(group[0].as_str()) {
                let reference_isolates = reference.is_some_and(|r| r.chars().count() <= 2);
                if !reference_isolates {
                    score -= w.isolated_phoneme_penalty;
                }
            }
        }

        score
    }
}

/// Whether the group's consonant/vowel silhouette, with runs collapsed, is
/// one of the plausible syllable shapes (CV, VC, CVC, V, C).
fn has_plausible_shape(group: &[Phoneme]) -> bool {
    let mut shape = String::new();
    for phoneme in group {
        let class = if phoneme.is_vowel() { 'V' } else { 'C' };
        if !shape.ends_with(class) {
            shape.push(class);
        }
    }
    matches!(shape.as_str(), "CV" | "VC" | "CVC" | "V" | "C")
}

/// Whether every phoneme in the group maps to a spelling correlate found in
/// the reference syllable, consumed left-to-right.
fn consumes_reference(group: &[Phoneme], reference: &str) -> bool {
    let reference = reference.to_lowercase();
    let mut position = 0;
    for phoneme in group {
        let correlates = inventory::orthographic_correlates(phoneme.as_str());
        let Some((found_at, matched_len)) = correlates
            .iter()
            .filter_map(|c| reference[position..].find(c).map(|at| (at, c.len())))
            .min_by_key(|&(at, _)| at)
        else {
            return false;
        };
        position += found_at + matched_len;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PartitionConfig;
    use crate::phonology::phoneme::{joined, seq_from_symbols};
    use crate::phonology::segmentation::segment;

    fn render(len_symbols: &[&str], boundaries: &[usize]) -> String {
        let phonemes = seq_from_symbols(len_symbols);
        groups_from_boundaries(&phonemes, boundaries)
            .iter()
            .map(|g| joined(g))
            .collect::<Vec<_>>()
            .join("|")
    }

    fn all_partitions(symbols: &[&str], groups: usize) -> Vec<String> {
        Partitions::new(symbols.len(), groups)
            .map(|b| render(symbols, &b))
            .collect()
    }

    #[test]
    fn test_enumeration_order_matches_recursive_formulation() {
        assert_eq!(all_partitions(&["a", "b", "c", "d"], 1), vec!["abcd"]);
        assert_eq!(
            all_partitions(&["a", "b", "c", "d"], 2),
            vec!["a|bcd", "ab|cd", "abc|d"]
        );
        assert_eq!(
            all_partitions(&["a", "b", "c", "d"], 3),
            vec!["a|b|cd", "a|bc|d", "ab|c|d"]
        );
        assert_eq!(
            all_partitions(&["a", "b", "c", "d", "e"], 3),
            vec!["a|b|cde", "a|bc|de", "a|bcd|e", "ab|c|de", "ab|cd|e", "abc|d|e"]
        );
    }

    #[test]
    fn test_diphthongs_are_single_units() {
        let phonemes = segment("abɑːd");
        let rendered: Vec<String> = Partitions::new(phonemes.len(), 2)
            .map(|b| {
                groups_from_boundaries(&phonemes, &b)
                    .iter()
                    .map(|g| joined(g))
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect();
        assert_eq!(rendered, vec!["a|bɑːd", "ab|ɑːd", "abɑː|d"]);
    }

    #[test]
    fn test_impossible_splits_yield_nothing() {
        assert_eq!(Partitions::new(2, 3).count(), 0);
        assert_eq!(Partitions::new(3, 0).count(), 0);
    }

    #[test]
    fn test_partition_counts_are_binomial() {
        // C(5, 2) = 10 partitions of 6 items into 3 groups.
        assert_eq!(Partitions::new(6, 3).count(), 10);
    }

    #[test]
    fn test_business_selects_balanced_split() {
        let config = PartitionConfig::default();
        let scorer = PartitionScorer::new(&config);
        let phonemes = seq_from_symbols(&["b", "ɪ", "z", "n", "ɪ", "s"]);
        let reference = vec!["busi".to_string(), "ness".to_string()];

        let syllables = scorer.best_partition(&phonemes, &[], &reference).unwrap();
        let rendered: Vec<String> = syllables.iter().map(Syllable::joined).collect();
        assert_eq!(rendered, vec!["bɪz", "nɪs"]);
    }

    #[test]
    fn test_round_trip_preserves_phonemes() {
        let config = PartitionConfig::default();
        let scorer = PartitionScorer::new(&config);
        let phonemes = segment("pɑlɪsi");
        let reference = vec!["po".to_string(), "li".to_string(), "cy".to_string()];

        let syllables = scorer.best_partition(&phonemes, &[], &reference).unwrap();
        let rejoined: String = syllables.iter().map(Syllable::joined).collect();
        assert_eq!(rejoined, "pɑlɪsi");
        assert_eq!(syllables.len(), 3);
    }

    #[test]
    fn test_single_syllable_shortcut() {
        let config = PartitionConfig::default();
        let scorer = PartitionScorer::new(&config);
        let phonemes = seq_from_symbols(&["k", "æ", "t"]);
        let reference = vec!["cat".to_string()];
        let syllables = scorer.best_partition(&phonemes, &[], &reference).unwrap();
        assert_eq!(syllables.len(), 1);
        assert_eq!(syllables[0].joined(), "kæt");
    }

    #[test]
    fn test_empty_transcription_is_skipped() {
        let config = PartitionConfig::default();
        let scorer = PartitionScorer::new(&config);
        assert!(scorer
            .best_partition(&[], &[], &["one".to_string()])
            .is_none());
    }

    #[test]
    fn test_marker_alignment_steers_choice() {
        let config = PartitionConfig::default();
        let scorer = PartitionScorer::new(&config);
        let phonemes = seq_from_symbols(&["t", "ɑ", "p", "ɪ", "k"]);
        // With a marker recorded before index 2, ta|pik beats tap|ik when the
        // references don't disambiguate.
        let reference = vec!["xx".to_string(), "xxx".to_string()];
        let syllables = scorer
            .best_partition(&phonemes, &[2], &reference)
            .unwrap();
        assert_eq!(syllables[0].joined(), "tɑ");
    }
}
