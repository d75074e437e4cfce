//! Morphological variant generation.
//!
//! Two halves that meet in the assignment engine:
//!
//! - the **phonetic side** hypothesizes derived forms of a generated syllable
//!   (plural, past, gerund, ...) by inserting the category's marker phoneme
//!   into the coda wherever the sonority graph's transition counts say the
//!   result stays pronounceable;
//! - the **English side** discovers which derived words actually exist in the
//!   dictionary ("jump" → "jumping") via a fixed affix pattern table, so the
//!   engine can keep related words phonetically related.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::sonority::{SonorityGraph, CODA};
use crate::phonology::phoneme::{joined, Phoneme, PhonemeSeq};
use crate::phonology::syllable::{coda_start, Corpus};

/// A morphological category with a phonetic marker and English affix
/// patterns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum VariantCategory {
    Past,
    Plural,
    Gerund,
    Actor,
    Participle,
    Superlative,
    Comparative,
    Adverb,
    Un,
    Dis,
    Re,
    In,
    Pre,
    Post,
    Non,
}

impl VariantCategory {
    /// Every category, in canonical order. Bit positions in
    /// [`VariantSignature`] follow this order.
    pub const ALL: [VariantCategory; 15] = [
        VariantCategory::Past,
        VariantCategory::Plural,
        VariantCategory::Gerund,
        VariantCategory::Actor,
        VariantCategory::Participle,
        VariantCategory::Superlative,
        VariantCategory::Comparative,
        VariantCategory::Adverb,
        VariantCategory::Un,
        VariantCategory::Dis,
        VariantCategory::Re,
        VariantCategory::In,
        VariantCategory::Pre,
        VariantCategory::Post,
        VariantCategory::Non,
    ];

    /// The phoneme inserted to realize this category phonetically
    /// (plural "bubbles" → /z/, gerund "bubbling" → /ŋ/, ...).
    pub fn marker(self) -> Phoneme {
        let symbol = match self {
            VariantCategory::Plural => "z",
            VariantCategory::Gerund => "ŋ",
            VariantCategory::Past => "d",
            VariantCategory::Actor => "s",
            VariantCategory::Participle => "n",
            VariantCategory::Comparative => "ɹ",
            VariantCategory::Superlative => "t",
            VariantCategory::Adverb => "l",
            VariantCategory::Un => "ə",
            VariantCategory::Dis => "ɪ",
            VariantCategory::Re => "i",
            VariantCategory::In => "m",
            VariantCategory::Pre => "p",
            VariantCategory::Post => "ʊ",
            VariantCategory::Non => "o",
        };
        Phoneme::new(symbol)
    }

    /// English affix patterns probed against the dictionary. `X*` prefixes X
    /// to the word; `*X` replaces the word's final character with X; each
    /// leading `^` drops one trailing character before appending.
    pub fn matchers(self) -> &'static [&'static str] {
        match self {
            VariantCategory::Un => &["un*"],
            VariantCategory::Dis => &["dis*"],
            VariantCategory::Re => &["re*"],
            VariantCategory::In => &["in*"],
            VariantCategory::Pre => &["pre*"],
            VariantCategory::Post => &["post*"],
            VariantCategory::Non => &["non*"],
            VariantCategory::Past => &["ed", "de"],
            VariantCategory::Plural => &["s", "es"],
            VariantCategory::Gerund => &["ing", "*ing"],
            VariantCategory::Actor => &["or", "er", "^^ress"],
            VariantCategory::Participle => &["en"],
            VariantCategory::Superlative => &["est", "^iest", "iest"],
            VariantCategory::Comparative => &["er", "^ier", "ier"],
            VariantCategory::Adverb => &["ly", "lily", "^ily"],
        }
    }

    /// Bit position of this category in a signature.
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Which variant categories a word (or candidate syllable) carries, as a
/// fixed-width bit set. String bitstrings exist only at serialization
/// boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VariantSignature(u16);

impl VariantSignature {
    /// The empty signature.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a signature from categories.
    pub fn from_categories<I: IntoIterator<Item = VariantCategory>>(categories: I) -> Self {
        let mut signature = Self::default();
        for category in categories {
            signature.insert(category);
        }
        signature
    }

    /// Add a category.
    pub fn insert(&mut self, category: VariantCategory) {
        self.0 |= category.bit();
    }

    /// Whether the category is present.
    pub fn contains(self, category: VariantCategory) -> bool {
        self.0 & category.bit() != 0
    }

    /// Whether no category is present.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Render as a fixed-width bitstring (serialization/diagnostics only).
    pub fn bitstring(self) -> String {
        VariantCategory::ALL
            .iter()
            .map(|c| if self.contains(*c) { '1' } else { '0' })
            .collect()
    }
}

/// Category → derived phoneme sequence. Absence of a category is a valid,
/// expected outcome, not a failure.
pub type AlternativeMap = BTreeMap<VariantCategory, PhonemeSeq>;

/// Hypothesize phonetically plausible derived forms of a one-syllable
/// phoneme sequence.
///
/// For each category, the marker phoneme is tried at every coda position
/// (including straight after the nucleus). An insertion is legal when the
/// transitions into and out of the marker each clear `min_support` in the
/// coda sub-graph and the resulting form is not already claimed; the
/// highest-scoring legal spot wins. Score is the supporting edge count, or
/// the mean of the incoming and outgoing counts for an interior insertion.
pub fn phonetic_alternatives(
    syllable: &[Phoneme],
    graph: &SonorityGraph,
    min_support: u32,
    mut is_taken: impl FnMut(&str) -> bool,
) -> AlternativeMap {
    let split = coda_start(syllable);
    let (head, coda) = syllable.split_at(split);
    let mut alternatives = AlternativeMap::new();

    for category in VariantCategory::ALL {
        let marker = category.marker();
        let mut best: Option<(f64, PhonemeSeq)> = None;

        for spot in 0..=coda.len() {
            let mut realization: PhonemeSeq = head.iter().copied().collect();
            realization.extend(coda[..spot].iter().copied());
            realization.push(marker);
            realization.extend(coda[spot..].iter().copied());

            if is_taken(&joined(&realization)) {
                continue;
            }

            let score = if spot == 0 {
                // Marker opens the coda; it must continue into the old coda
                // start, or stop cleanly when there is none.
                let continuation = coda.first().copied();
                match graph.transition_count(CODA, Some(marker), continuation) {
                    Some(count) if count > min_support => f64::from(count),
                    _ => continue,
                }
            } else {
                let previous = coda[spot - 1];
                let incoming = match graph.transition_count(CODA, Some(previous), Some(marker)) {
                    Some(count) if count > min_support => count,
                    _ => continue,
                };
                if spot < coda.len() {
                    let after = coda[spot];
                    let outgoing =
                        match graph.transition_count(CODA, Some(marker), Some(after)) {
                            Some(count) if count > min_support => count,
                            _ => continue,
                        };
                    f64::from(incoming + outgoing) / 2.0
                } else {
                    f64::from(incoming)
                }
            };

            if best.as_ref().map_or(true, |(b, _)| score > *b) {
                best = Some((score, realization));
            }
        }

        if let Some((score, realization)) = best {
            if score > 0.0 {
                alternatives.insert(category, realization);
            }
        }
    }

    alternatives
}

/// Apply one affix pattern to a word, producing the hypothetical derived
/// spelling. Returns `None` when the word is too short for the pattern.
pub fn apply_pattern(word: &str, pattern: &str) -> Option<String> {
    if let Some(prefix) = pattern.strip_suffix('*') {
        return Some(format!("{prefix}{word}"));
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        let mut chars = word.chars();
        chars.next_back()?;
        let stem: &str = chars.as_str();
        if stem.is_empty() {
            return None;
        }
        return Some(format!("{stem}{suffix}"));
    }
    let drop = pattern.chars().take_while(|&c| c == '^').count();
    if drop > 0 {
        let suffix = &pattern[drop..];
        let char_count = word.chars().count();
        if char_count <= drop {
            return None;
        }
        let stem: String = word.chars().take(char_count - drop).collect();
        return Some(format!("{stem}{suffix}"));
    }
    Some(format!("{word}{pattern}"))
}

/// Find the word's real English variants present in the dictionary.
///
/// For each category the patterns are tried in order and the first
/// constructed word that exists wins; categories with no hit are simply
/// absent.
pub fn english_variants(word: &str, corpus: &Corpus) -> Vec<(VariantCategory, String)> {
    let mut found = Vec::new();
    for category in VariantCategory::ALL {
        for pattern in category.matchers() {
            if let Some(candidate) = apply_pattern(word, pattern) {
                if candidate != word && corpus.contains(&candidate) {
                    found.push((category, candidate));
                    break;
                }
            }
        }
    }
    found
}
