//! Phoneme segmentation: raw transcription strings to phoneme tokens.
//!
//! A deterministic one-pass tokenizer. Multi-character symbols are matched
//! greedily against the ordered table in [`inventory::IPA_SYMBOL_GROUPS`]
//! (longest spellings first), so an affricate like /dʒ/ is never split into
//! /d/ + /ʒ/. Anything unrecognized is emitted as its own single-character
//! token; segmentation never fails.

use tracing::debug;

use crate::phonology::inventory;
use crate::phonology::phoneme::{Phoneme, PhonemeSeq};

/// Split a raw phonetic string into phoneme tokens, keeping multi-letter
/// sequences and diphthongs together.
pub fn segment(transcription: &str) -> PhonemeSeq {
    let mut phonemes = PhonemeSeq::new();
    let mut rest = transcription;

    'outer: while !rest.is_empty() {
        for symbol in inventory::IPA_SYMBOL_GROUPS {
            if let Some(remaining) = rest.strip_prefix(symbol) {
                phonemes.push(Phoneme::new(symbol));
                rest = remaining;
                continue 'outer;
            }
        }
        // No table entry starts here; take one character as an unknown token.
        let ch = rest.chars().next().unwrap_or('\0');
        debug!(symbol = %ch, context = %transcription, "unknown phonetic symbol");
        let len = ch.len_utf8();
        phonemes.push(Phoneme::new(&rest[..len]));
        rest = &rest[len..];
    }

    phonemes
}

/// Segment a transcription and strip stress/boundary markers, returning the
/// bare phonemes together with the phoneme indices that followed a marker.
/// The partition scorer uses those indices as boundary hints.
pub fn segment_with_markers(transcription: &str) -> (PhonemeSeq, Vec<usize>) {
    let mut phonemes = PhonemeSeq::new();
    let mut marker_positions = Vec::new();

    for token in segment(transcription) {
        if token.is_marker() {
            marker_positions.push(phonemes.len());
        } else {
            phonemes.push(token);
        }
    }

    (phonemes, marker_positions)
}
