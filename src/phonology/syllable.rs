//! Syllables, dictionary word entries, and the frequency-ordered corpus.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::phonology::phoneme::{joined, Phoneme, PhonemeSeq};

/// An ordered phoneme sequence forming one syllable.
///
/// Logically partitioned into onset (pre-vowel consonants), nucleus (vowels or
/// a syllabic consonant) and coda (post-vowel consonants); either edge may be
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Syllable {
    /// The phonemes of the syllable, in order.
    pub phonemes: PhonemeSeq,
}

/// The onset/nucleus/coda decomposition of a syllable.
///
/// Malformed syllables (no vowel, or a vowel reappearing after the coda has
/// started) degrade to all-empty parts rather than erroring; the graph builder
/// skips them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyllableParts {
    /// Consonants before the nucleus.
    pub onset: PhonemeSeq,
    /// The vowel run.
    pub nucleus: PhonemeSeq,
    /// Consonants after the nucleus.
    pub coda: PhonemeSeq,
}

impl SyllableParts {
    /// Whether the decomposition failed (degenerate syllable).
    pub fn is_empty(&self) -> bool {
        self.onset.is_empty() && self.nucleus.is_empty() && self.coda.is_empty()
    }
}

impl Syllable {
    /// Wrap a phoneme sequence as a syllable.
    pub fn new(phonemes: PhonemeSeq) -> Self {
        Self { phonemes }
    }

    /// The flat transcription of this syllable.
    pub fn joined(&self) -> String {
        joined(&self.phonemes)
    }

    /// Split into onset, nucleus, and coda by scanning for the vowel run.
    pub fn parts(&self) -> SyllableParts {
        split_parts(&self.phonemes)
    }
}

/// Split a phoneme slice into onset/nucleus/coda.
///
/// The first vowel starts the nucleus; the first post-nucleus consonant starts
/// the coda. A sequence with no vowel, or with a vowel inside the coda,
/// degrades to empty parts.
pub fn split_parts(phonemes: &[Phoneme]) -> SyllableParts {
    let Some(nucleus_start) = phonemes.iter().position(Phoneme::is_vowel) else {
        return SyllableParts::default();
    };
    let nucleus_end = phonemes[nucleus_start..]
        .iter()
        .position(|p| !p.is_vowel())
        .map_or(phonemes.len(), |offset| nucleus_start + offset);

    if phonemes[nucleus_end..].iter().any(Phoneme::is_vowel) {
        return SyllableParts::default();
    }

    SyllableParts {
        onset: phonemes[..nucleus_start].iter().copied().collect(),
        nucleus: phonemes[nucleus_start..nucleus_end].iter().copied().collect(),
        coda: phonemes[nucleus_end..].iter().copied().collect(),
    }
}

/// Index of the first coda phoneme in a sequence, or the sequence length when
/// there is no coda. Variant insertion keys off this split.
pub fn coda_start(phonemes: &[Phoneme]) -> usize {
    let Some(nucleus_start) = phonemes.iter().position(Phoneme::is_vowel) else {
        return phonemes.len();
    };
    phonemes[nucleus_start..]
        .iter()
        .position(|p| !p.is_vowel())
        .map_or(phonemes.len(), |offset| nucleus_start + offset)
}

/// A dictionary word with its canonical syllabified pronunciation.
///
/// Created once at load time; immutable thereafter. Entries arrive in
/// frequency rank order, which the assignment engine depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntry {
    /// English spelling, the unique key.
    pub word: String,
    /// Pronunciation split into syllables. Always at least one.
    pub syllables: Vec<Syllable>,
}

impl WordEntry {
    /// All phonemes of the word, flattened across syllables.
    pub fn flat_phonemes(&self) -> PhonemeSeq {
        self.syllables
            .iter()
            .flat_map(|s| s.phonemes.iter().copied())
            .collect()
    }

    /// The word's full pronunciation as one string.
    pub fn joined(&self) -> String {
        joined(&self.flat_phonemes())
    }

    /// Whether this word is already monosyllabic.
    pub fn is_monosyllabic(&self) -> bool {
        self.syllables.len() == 1
    }
}

/// The full syllabified dictionary, in frequency rank order (most common
/// first, unranked words appended at the end).
///
/// Iteration order is load order; the assignment engine's greedy passes
/// depend on it, so the corpus is never re-sorted after construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    entries: IndexMap<String, Vec<Syllable>>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word with its syllabified pronunciation. Keeps the first
    /// pronunciation when a word repeats.
    pub fn push(&mut self, word: impl Into<String>, syllables: Vec<Syllable>) {
        self.entries.entry(word.into()).or_insert(syllables);
    }

    /// Look up a word's syllables.
    pub fn get(&self, word: &str) -> Option<&[Syllable]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// Whether the word is present.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Iterate entries in frequency order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Syllable])> {
        self.entries.iter().map(|(w, s)| (w.as_str(), s.as_slice()))
    }

    /// Iterate all syllables of all words.
    pub fn syllables(&self) -> impl Iterator<Item = &Syllable> {
        self.entries.values().flatten()
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
