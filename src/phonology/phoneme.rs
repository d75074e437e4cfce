//! Interned phoneme symbols.
//!
//! Sixty thousand words multiplied by a handful of phonemes each means the
//! same few dozen symbols repeat millions of times across the run. Phonemes
//! are therefore interned once in a global [`lasso`] rodeo and passed around
//! as copyable keys; comparisons and hashing never touch string data. The
//! interner is pre-populated with the full inventory so the hot path almost
//! never allocates.

use std::fmt;

use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::phonology::inventory;

/// A short sequence of phonemes. Syllables rarely exceed six phonemes, so the
/// inline capacity keeps most sequences off the heap.
pub type PhonemeSeq = SmallVec<[Phoneme; 8]>;

static INTERNER: Lazy<ThreadedRodeo> = Lazy::new(|| {
    let rodeo = ThreadedRodeo::default();
    for symbol in inventory::VOWELS {
        rodeo.get_or_intern_static(symbol);
    }
    for symbol in inventory::CONSONANTS {
        rodeo.get_or_intern_static(symbol);
    }
    for symbol in inventory::IPA_SYMBOL_GROUPS {
        rodeo.get_or_intern_static(symbol);
    }
    rodeo
});

/// An atomic phoneme symbol, interned by value.
///
/// Multi-character symbols (affricates, diphthongs, syllabic consonants) are
/// single phonemes. Equality and hashing are key comparisons.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Phoneme(Spur);

impl Phoneme {
    /// Intern a symbol and return its phoneme handle.
    pub fn new(symbol: &str) -> Self {
        Self(INTERNER.get_or_intern(symbol))
    }

    /// Resolve the phoneme back to its symbol.
    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(&self.0)
    }

    /// Whether this phoneme is a vowel or diphthong.
    pub fn is_vowel(&self) -> bool {
        inventory::is_vowel_symbol(self.as_str())
    }

    /// Whether this phoneme is a consonant.
    pub fn is_consonant(&self) -> bool {
        inventory::is_consonant_symbol(self.as_str())
    }

    /// Whether this phoneme is a stress or boundary marker token.
    pub fn is_marker(&self) -> bool {
        inventory::is_marker_symbol(self.as_str())
    }

    /// Whether this phoneme shares an articulatory similarity group with
    /// `other`.
    pub fn is_similar_to(&self, other: Phoneme) -> bool {
        inventory::are_similar_symbols(self.as_str(), other.as_str())
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl PartialOrd for Phoneme {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Phoneme {
    /// Orders by symbol text so serialized artifacts are stable across runs.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Serialize for Phoneme {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Phoneme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        Ok(Phoneme::new(&symbol))
    }
}

/// Join a phoneme slice into its flat transcription string.
pub fn joined(phonemes: &[Phoneme]) -> String {
    phonemes.iter().map(Phoneme::as_str).collect()
}

/// Build a phoneme sequence from symbol strings. Test and loader convenience.
pub fn seq_from_symbols<S: AsRef<str>>(symbols: &[S]) -> PhonemeSeq {
    symbols.iter().map(|s| Phoneme::new(s.as_ref())).collect()
}
