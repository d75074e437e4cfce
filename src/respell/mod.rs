//! Respelling: phonetic forms to approximate Latin orthography.
//!
//! A deterministic greedy longest-prefix rewrite over an explicitly ordered
//! key (multi-phoneme sequences like /aɪər/ → "ire" are checked before single
//! phonemes). Phonemes that spell differently when they end a syllable (a
//! trailing /ɪ/ is "ih", not "i") are handled by a special-ender table
//! checked first. Unmatched characters pass through unchanged; respelling
//! never fails.
//!
//! The key is based on Wikipedia's pronunciation respelling key, with
//! adjustments. Not all rules are followed since this focuses on monosyllabic
//! words (for example checked vowels).

use tracing::debug;

use crate::phonology::phoneme::{joined, Phoneme};

/// (replacement, IPA spelling) pairs, in match order.
static RESPELL_KEY: &[(&str, &str)] = &[
    ("ire", "aɪər"),
    ("oir", "ɔɪər"),
    ("our", "aʊər"),
    ("eer", "ɪər"),
    ("air", "ɛər"),
    ("ure", "jʊər"),
    ("ur", "ɜːr"),
    ("ew", "juː"),
    ("eye", "aɪ"),
    ("err", "ɛr"),
    ("irr", "ɪr"),
    ("urr", "ʌr"),
    ("uurr", "ʊr"),
    ("uhr", "ər"),
    ("oor", "ʊər"),
    ("or", "ɔːr"),
    ("orr", "ɒr"),
    ("oh", "oʊ"),
    ("oo", "uː"),
    ("ar", "ɑːr"),
    ("arr", "ær"),
    ("y", "aɪ"),
    ("ay", "eɪ"),
    ("ee", "iː"),
    ("aw", "ɔː"),
    ("ow", "aʊ"),
    ("oy", "ɔɪ"),
    ("ah", "ɑː"),
    ("ah", "ɑ"),
    ("ee", "i"),
    ("oo", "u"),
    ("aw", "ɔ"),
    ("uh", "ə"), // use `uh` instead of ə
    //
    ("a", "æ"),
    ("o", "ɒ"),
    ("uu", "ʊ"),
    //
    ("i", "ɪ"),
    ("u", "ʌ"),
    ("e", "ɛ"),
    //
    ("j", "dʒ"),
    ("nk", "ŋk"),
    ("wh", "hw"),
    ("b", "b"),
    ("ch", "tʃ"),
    ("d", "d"),
    ("dh", "ð"),
    ("f", "f"),
    ("g", "ɡ"),
    ("h", "h"),
    ("k", "k"),
    ("kh", "x"),
    ("l", "l"),
    ("l", "ɫ"),
    ("m", "m"),
    ("n", "n"),
    ("ng", "ŋ"),
    ("p", "p"),
    ("r", "ɹ"),
    ("r", "r"),
    ("s", "s"),
    ("sh", "ʃ"),
    ("t", "t"),
    ("th", "θ"),
    ("v", "v"),
    ("w", "w"),
    ("y", "j"),
    ("z", "z"),
    ("zh", "ʒ"),
];

/// Spellings used only when the phoneme ends the syllable: a trailing /ɪ/ is
/// "ih" rather than "i", and similarly for /ʌ/ and /ɛ/.
static SPECIAL_ENDERS: &[(&str, &str)] = &[("ih", "ɪ"), ("uh", "ʌ"), ("eh", "ɛ")];

/// Respell a flat phonetic string into approximate Latin orthography.
pub fn respell(ipa: &str) -> String {
    let mut accum = String::with_capacity(ipa.len());
    let mut remain = ipa;

    'outer: while !remain.is_empty() {
        // Syllable-final special cases first: the remaining input must be
        // exactly the ender's phoneme.
        for (replacement, check) in SPECIAL_ENDERS {
            if remain == *check {
                accum.push_str(replacement);
                break 'outer;
            }
        }
        for (replacement, check) in RESPELL_KEY {
            if let Some(rest) = remain.strip_prefix(check) {
                accum.push_str(replacement);
                remain = rest;
                continue 'outer;
            }
        }
        // Unknown symbol; pass it through.
        let ch = remain.chars().next().unwrap_or('\0');
        debug!(symbol = %ch, "could not respell symbol");
        accum.push(ch);
        remain = &remain[ch.len_utf8()..];
    }

    accum
}

/// Respell a phoneme sequence.
pub fn respell_phonemes(phonemes: &[Phoneme]) -> String {
    respell(&joined(phonemes))
}
