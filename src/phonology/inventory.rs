//! The fixed phoneme inventory and its lookup tables.
//!
//! Everything phonological the pipeline knows is data in this module: the
//! vowel and consonant sets, the articulatory similarity groups used by the
//! candidate scorer, the ordered multi-character symbol table driving the
//! segmenter, the ARPABET conversion map, and the phoneme → orthographic
//! correlate table the partition scorer aligns against reference spellings.

use ahash::AHashSet;
use once_cell::sync::Lazy;

/// Vowel symbols (including diphthongs). First vowel in a syllable starts the
/// nucleus.
pub static VOWELS: &[&str] = &[
    "a", "ɑ", "æ", "ʌ", "ɔ", "aʊ", "ɚ", "ə", "aɪ", "ɛ", "ɝ", "eɪ", "ɪ", "ɨ", "i", "oʊ", "ɔɪ",
    "ʊ", "u", "ʉ",
];

/// Consonant symbols, including the syllabic consonants that can carry a
/// nucleus in words like "rhythm".
pub static CONSONANTS: &[&str] = &[
    "b", "tʃ", "d", "ð", "ɾ", "l̩", "m̩", "n̩", "f", "ɡ", "h", "dʒ", "k", "l", "m", "n", "ŋ",
    "ɾ̃", "p", "ʔ", "ɹ", "s", "ʃ", "t", "θ", "v", "w", "ʍ", "j", "z", "ʒ",
];

/// Near-confusable phoneme clusters. A candidate phoneme in the same group as
/// a target phoneme earns partial credit instead of the miss penalty.
/// Grouping of ɔ depends on cot-caught merger status; NE American assumed.
pub static SIMILARITY_GROUPS: &[&[&str]] = &[
    &["b", "p"],
    &["k", "g", "ɡ"],
    &["ɡ", "g", "ŋ"],
    &["n", "ŋ"],
    &["m", "n", "m̩", "n̩"],
    &["tʃ", "ʃ", "s"],
    &["ð", "v", "z", "θ"],
    &["l", "ɹ", "ɾ", "ɾ̃", "r"],
    &["v", "w", "ʍ"],
    &["dʒ", "ʒ", "j"],
    &["h", "ʔ"],
    &["a", "ɑ", "æ", "ɔ", "eɪ"],
    &["ʌ", "aʊ"],
    &["ɚ", "ɝ"],
    &["oʊ", "ɔɪ", "ʊ"],
    &["ɪ", "i"],
    &["ɛ", "e", "ə"],
    &["u", "ʉ"],
];

/// Stress and boundary markers that may appear in raw transcriptions. The
/// segmenter emits them as tokens; the partition search strips them and
/// remembers where they were.
pub static BOUNDARY_MARKERS: &[&str] = &["ˈ", "ˌ", "."];

/// Multi-character IPA spellings and the single-character tail, in match
/// order. Longer sequences come first so an affricate is never split into two
/// simple consonants.
pub static IPA_SYMBOL_GROUPS: &[&str] = &[
    "dʒ", "eɪ", "t͡s", "l̥", "ɑː", "kʰ", "ʌ̃", "ɔː", "d͡ʒ", "ɜː", "uː", "aɪ", "tʰ", "iː", "əʊ",
    "aʊ", "oʊ", "ɔɪ", "tʃ", "l̩", "m̩", "n̩", "ɾ̃", "(ɹ)", "(ː)", "(n)", "(j)", "(ʊ)", "(ə)",
    "(t)", "(s)",
    //
    "ɪ", "ə", "ʊ", "ð", "z", "ˈ", "ˌ", ".", "ʃ", "ɹ", "θ", "ɔ", "æ", "ɡ", "ɑ", "ɜ", "ɒ", "ɛ",
    "ʌ", "ʒ", "ɝ", "ŋ", "ɚ", "ʍ", "ɨ", "ʉ", "ɫ", "˨", "ɐ", "x", "ʔ", "ɘ", "ɾ", "ɵ", "˥", "ɯ",
    "ä", "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "a", "s", "d", "f", "g", "h", "j",
    "k", "l", "z", "c", "v", "b", "n", "m",
];

/// ARPABET phone → IPA symbol.
pub static ARPABET_TO_IPA: &[(&str, &str)] = &[
    ("AA", "ɑ"),
    ("AE", "æ"),
    ("AH", "ʌ"),
    ("AO", "ɔ"),
    ("AW", "aʊ"),
    ("AX", "ɚ"),
    ("AXR", "ə"),
    ("AY", "aɪ"),
    ("EH", "ɛ"),
    ("ER", "ɝ"),
    ("EY", "eɪ"),
    ("IH", "ɪ"),
    ("IX", "ɨ"),
    ("IY", "i"),
    ("OW", "oʊ"),
    ("OY", "ɔɪ"),
    ("UH", "ʊ"),
    ("UW", "u"),
    ("UX", "ʉ"),
    //
    ("B", "b"),
    ("CH", "tʃ"),
    ("D", "d"),
    ("DH", "ð"),
    ("DX", "ɾ"),
    ("EL", "l̩"),
    ("EM", "m̩"),
    ("EN", "n̩"),
    ("F", "f"),
    ("G", "ɡ"),
    ("HH", "h"),
    ("H", "h"),
    ("JH", "dʒ"),
    ("K", "k"),
    ("L", "l"),
    ("M", "m"),
    ("N", "n"),
    ("NG", "ŋ"),
    ("NX", "ɾ̃"),
    ("P", "p"),
    ("Q", "ʔ"),
    ("R", "ɹ"),
    ("S", "s"),
    ("SH", "ʃ"),
    ("T", "t"),
    ("TH", "θ"),
    ("V", "v"),
    ("W", "w"),
    ("WH", "ʍ"),
    ("Y", "j"),
    ("Z", "z"),
    ("ZH", "ʒ"),
];

/// Phoneme → plausible English spellings, most specific first. Used by the
/// partition scorer to align phoneme groups with reference spellings.
pub static ORTHOGRAPHIC_CORRELATES: &[(&str, &[&str])] = &[
    ("b", &["b"]),
    ("d", &["d"]),
    ("f", &["ff", "ph", "f"]),
    ("ɡ", &["g"]),
    ("h", &["h"]),
    ("dʒ", &["dge", "j", "g"]),
    ("k", &["ck", "ch", "c", "k", "q"]),
    ("l", &["ll", "l"]),
    ("m", &["m"]),
    ("n", &["nn", "n"]),
    ("ŋ", &["ng", "n"]),
    ("p", &["pp", "p"]),
    ("ɹ", &["rr", "r"]),
    ("s", &["ss", "ce", "s", "c"]),
    ("ʃ", &["sh", "ti", "ci", "s"]),
    ("t", &["tt", "ed", "t"]),
    ("tʃ", &["tch", "ch"]),
    ("θ", &["th"]),
    ("ð", &["th"]),
    ("v", &["v"]),
    ("w", &["wh", "w", "u"]),
    ("ʍ", &["wh"]),
    ("j", &["y", "i"]),
    ("z", &["zz", "z", "s"]),
    ("ʒ", &["s", "z", "g"]),
    ("ʔ", &["t"]),
    ("ɾ", &["tt", "t", "d"]),
    ("ɫ", &["ll", "l"]),
    ("l̩", &["le", "l"]),
    ("m̩", &["m"]),
    ("n̩", &["on", "n"]),
    ("ɾ̃", &["n"]),
    //
    ("ʌ", &["u", "o"]),
    ("æ", &["a"]),
    ("ɑ", &["a", "o"]),
    ("ɔ", &["augh", "au", "aw", "o", "a"]),
    ("aʊ", &["ou", "ow"]),
    ("ɚ", &["er", "or", "ar", "ur"]),
    ("ə", &["a", "e", "o", "u", "i"]),
    ("aɪ", &["igh", "i", "y"]),
    ("ɛ", &["ea", "e", "a"]),
    ("ɝ", &["ear", "er", "ir", "ur", "or"]),
    ("eɪ", &["ai", "ay", "ei", "a"]),
    ("ɪ", &["i", "y", "u", "e"]),
    ("ɨ", &["i", "e"]),
    ("i", &["ee", "ea", "ey", "e", "y", "i"]),
    ("oʊ", &["oa", "ow", "o"]),
    ("ɔɪ", &["oi", "oy"]),
    ("ʊ", &["oo", "u", "ou"]),
    ("u", &["oo", "ew", "ue", "u", "o"]),
    ("ʉ", &["u"]),
];

/// Phonemes penalized when isolated as a whole syllable group.
pub static ISOLATION_PENALIZED: &[&str] = &["ɹ", "r", "ɾ", "ɚ", "ɝ", "ɡ", "g", "ŋ"];

static VOWEL_SET: Lazy<AHashSet<&'static str>> = Lazy::new(|| VOWELS.iter().copied().collect());
static CONSONANT_SET: Lazy<AHashSet<&'static str>> =
    Lazy::new(|| CONSONANTS.iter().copied().collect());
static MARKER_SET: Lazy<AHashSet<&'static str>> =
    Lazy::new(|| BOUNDARY_MARKERS.iter().copied().collect());

/// Whether a symbol is a vowel (or diphthong).
pub fn is_vowel_symbol(symbol: &str) -> bool {
    VOWEL_SET.contains(symbol)
}

/// Whether a symbol is a consonant (including syllabic consonants).
pub fn is_consonant_symbol(symbol: &str) -> bool {
    CONSONANT_SET.contains(symbol)
}

/// Whether a symbol is a stress or syllable-boundary marker.
pub fn is_marker_symbol(symbol: &str) -> bool {
    MARKER_SET.contains(symbol)
}

/// Whether two symbols belong to a shared articulatory similarity group.
pub fn are_similar_symbols(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    SIMILARITY_GROUPS
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
}

/// Look up the IPA rendering of an ARPABET phone (stress digits already
/// stripped).
pub fn arpabet_to_ipa(phone: &str) -> Option<&'static str> {
    ARPABET_TO_IPA
        .iter()
        .find(|(arpa, _)| *arpa == phone)
        .map(|(_, ipa)| *ipa)
}

/// The spelling correlates for a phoneme symbol, most specific first.
pub fn orthographic_correlates(symbol: &str) -> &'static [&'static str] {
    ORTHOGRAPHIC_CORRELATES
        .iter()
        .find(|(p, _)| *p == symbol)
        .map(|(_, spellings)| *spellings)
        .unwrap_or(&[])
}

/// Whether the symbol is penalized when it forms a whole group on its own.
pub fn is_isolation_penalized(symbol: &str) -> bool {
    ISOLATION_PENALIZED.contains(&symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_and_consonant_sets_are_disjoint() {
        for v in VOWELS {
            assert!(!is_consonant_symbol(v), "{v} in both sets");
        }
        for c in CONSONANTS {
            assert!(!is_vowel_symbol(c), "{c} in both sets");
        }
    }

    #[test]
    fn test_similarity_is_symmetric() {
        assert!(are_similar_symbols("b", "p"));
        assert!(are_similar_symbols("p", "b"));
        assert!(are_similar_symbols("ɪ", "i"));
        assert!(!are_similar_symbols("b", "i"));
    }

    #[test]
    fn test_arpabet_lookup() {
        assert_eq!(arpabet_to_ipa("CH"), Some("tʃ"));
        assert_eq!(arpabet_to_ipa("AY"), Some("aɪ"));
        assert_eq!(arpabet_to_ipa("ZZZ"), None);
    }

    #[test]
    fn test_multichar_symbols_precede_their_prefixes() {
        // Greedy matching relies on "dʒ" appearing before "d".
        let d_pos = IPA_SYMBOL_GROUPS.iter().position(|s| *s == "d").unwrap();
        let dz_pos = IPA_SYMBOL_GROUPS.iter().position(|s| *s == "dʒ").unwrap();
        assert!(dz_pos < d_pos);
        let a_pos = IPA_SYMBOL_GROUPS.iter().position(|s| *s == "a").unwrap();
        let ai_pos = IPA_SYMBOL_GROUPS.iter().position(|s| *s == "aɪ").unwrap();
        assert!(ai_pos < a_pos);
    }
}
