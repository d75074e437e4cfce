//! Dictionary input loading.
//!
//! Two inputs feed the pipeline: a frequency list (one word per line, most
//! common first, tab-separated payload ignored) and a pronunciation
//! dictionary. The dictionary either arrives pre-syllabified in ARPABET
//! (cmudict-syl style, `.` between syllables) or as flat IPA transcriptions
//! with a hyphenated reference spelling, in which case syllable boundaries
//! are recovered by the partition search.
//!
//! Missing or unreadable input files are the one fatal condition in the
//! system; individual malformed entries merely degrade with a diagnostic.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::core::config::{GenerationConfig, IoConfig, PartitionConfig, PronunciationFormat};
use crate::core::errors::{MonosylError, Result};
use crate::phonology::inventory;
use crate::phonology::partition::PartitionScorer;
use crate::phonology::phoneme::{Phoneme, PhonemeSeq};
use crate::phonology::segmentation::segment_with_markers;
use crate::phonology::syllable::{Corpus, Syllable};

/// Load the frequency list, truncated to the cutoff. Each line is a word
/// followed by an optional tab-separated payload.
pub async fn load_frequency_list(path: &Path, cutoff: usize) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        MonosylError::io(
            format!("Failed to read word frequency list: {}", path.display()),
            e,
        )
    })?;

    let words: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split('\t')
                .next()
                .unwrap_or(line)
                .trim()
                .to_lowercase()
        })
        .take(cutoff)
        .collect();

    info!(count = words.len(), "loaded word frequencies");
    Ok(words)
}

/// Parse a cmudict-syl style dictionary into word → syllables, in file
/// order. Comment lines start with `#`; alternate pronunciations like
/// `WORD(2)` are skipped; stress digits are stripped from each phone.
pub async fn load_cmu_dictionary(path: &Path) -> Result<IndexMap<String, Vec<Syllable>>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        MonosylError::io(
            format!("Failed to read pronunciation list: {}", path.display()),
            e,
        )
    })?;

    let mut entries: IndexMap<String, Vec<Syllable>> = IndexMap::new();
    for (number, line) in content.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let Some((word_upper, sounds)) = line.split_once("  ") else {
            warn!(line = number + 1, "malformed dictionary line, skipped");
            continue;
        };
        if is_alternate_pronunciation(word_upper) {
            continue;
        }

        let mut syllables = Vec::new();
        let mut dropped = false;
        for chunk in sounds.split('.') {
            let mut phonemes = PhonemeSeq::new();
            for phone in chunk.split_whitespace() {
                let bare = phone.trim_end_matches(|c: char| c.is_ascii_digit());
                match inventory::arpabet_to_ipa(bare) {
                    Some(ipa) => phonemes.push(Phoneme::new(ipa)),
                    None => {
                        debug!(phone, word = word_upper, "unknown ARPABET phone");
                        dropped = true;
                    }
                }
            }
            if !phonemes.is_empty() {
                syllables.push(Syllable::new(phonemes));
            }
        }

        if syllables.is_empty() {
            warn!(word = word_upper, "entry with no usable syllables, skipped");
            continue;
        }
        if dropped {
            debug!(word = word_upper, "entry kept with unknown phones dropped");
        }
        entries
            .entry(word_upper.to_lowercase())
            .or_insert(syllables);
    }

    info!(count = entries.len(), "parsed pronunciation dictionary");
    Ok(entries)
}

/// Parse a flat-IPA dictionary: `word<TAB>ipa<TAB>hy-phen-at-ed` per line.
/// The hyphenated reference spelling fixes the syllable count; the partition
/// search picks the boundaries.
pub async fn load_flat_ipa_dictionary(
    path: &Path,
    partition: &PartitionConfig,
) -> Result<IndexMap<String, Vec<Syllable>>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        MonosylError::io(
            format!("Failed to read pronunciation list: {}", path.display()),
            e,
        )
    })?;

    let scorer = PartitionScorer::new(partition);
    let mut entries: IndexMap<String, Vec<Syllable>> = IndexMap::new();
    for (number, line) in content.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let (Some(word), Some(ipa)) = (fields.next(), fields.next()) else {
            warn!(line = number + 1, "malformed dictionary line, skipped");
            continue;
        };
        let reference: Vec<String> = fields
            .next()
            .unwrap_or(word)
            .split('-')
            .map(str::to_lowercase)
            .collect();

        let (phonemes, markers) = segment_with_markers(ipa);
        match scorer.best_partition(&phonemes, &markers, &reference) {
            Some(syllables) => {
                entries.entry(word.to_lowercase()).or_insert(syllables);
            }
            None => {
                warn!(word, "could not split transcription into syllables, skipped");
            }
        }
    }

    info!(count = entries.len(), "parsed flat IPA dictionary");
    Ok(entries)
}

/// Order dictionary entries by frequency rank. Words missing a rank still
/// matter; they are appended after the ranked words in dictionary order.
pub fn order_by_frequency(
    frequency: &[String],
    pronunciations: IndexMap<String, Vec<Syllable>>,
) -> Corpus {
    let mut corpus = Corpus::new();
    let mut used: ahash::AHashSet<&str> = ahash::AHashSet::new();

    for word in frequency {
        if let Some(syllables) = pronunciations.get(word) {
            corpus.push(word.clone(), syllables.clone());
            used.insert(word.as_str());
        }
    }
    for (word, syllables) in &pronunciations {
        if !used.contains(word.as_str()) {
            corpus.push(word.clone(), syllables.clone());
        }
    }
    corpus
}

/// Load the full corpus per the I/O configuration: frequency list plus
/// pronunciation dictionary, merged in frequency order.
pub async fn load_corpus(
    io: &IoConfig,
    generation: &GenerationConfig,
    partition: &PartitionConfig,
) -> Result<Corpus> {
    let frequency =
        load_frequency_list(&io.word_frequency_list, generation.word_frequency_cutoff).await?;
    let pronunciations = match io.pronunciation_format {
        PronunciationFormat::CmuSyllabified => {
            load_cmu_dictionary(&io.pronunciation_list).await?
        }
        PronunciationFormat::FlatIpa => {
            load_flat_ipa_dictionary(&io.pronunciation_list, partition).await?
        }
    };
    if pronunciations.is_empty() {
        return Err(MonosylError::validation(format!(
            "pronunciation dictionary {} contained no usable entries",
            io.pronunciation_list.display()
        )));
    }
    let corpus = order_by_frequency(&frequency, pronunciations);
    info!(words = corpus.len(), "corpus ready in frequency order");
    Ok(corpus)
}

/// `WORD(2)`-style alternate pronunciation headers are skipped.
fn is_alternate_pronunciation(word: &str) -> bool {
    word.ends_with(')')
        && word
            .rfind('(')
            .map_or(false, |open| word[open + 1..word.len() - 1].chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_frequency_list_truncates_and_lowercases() {
        let file = temp_file("THE\t23135851162\nof\t13151942776\nand\t12997637966\n");
        let words = load_frequency_list(file.path(), 2).await.unwrap();
        assert_eq!(words, vec!["the", "of"]);
    }

    #[tokio::test]
    async fn test_missing_frequency_list_is_fatal() {
        let result = load_frequency_list(Path::new("/nonexistent/frequencies"), 10).await;
        assert!(matches!(result, Err(MonosylError::Io { .. })));
    }

    #[tokio::test]
    async fn test_cmu_parsing() {
        let file = temp_file(
            "# comment line\n\
             CAT  K AE1 T\n\
             BUSINESS  B IH1 Z . N IH0 S\n\
             BUSINESS(2)  B IH1 Z . N EH0 S\n",
        );
        let entries = load_cmu_dictionary(file.path()).await.unwrap();
        assert_eq!(entries.len(), 2);

        let cat = &entries["cat"];
        assert_eq!(cat.len(), 1);
        assert_eq!(cat[0].joined(), "kæt");

        let business = &entries["business"];
        assert_eq!(business.len(), 2);
        assert_eq!(business[0].joined(), "bɪz");
        assert_eq!(business[1].joined(), "nɪs");
    }

    #[tokio::test]
    async fn test_cmu_skips_unusable_entries() {
        let file = temp_file("GOOD  G UH1 D\nBROKEN\nEMPTY  QQ1\n");
        let entries = load_cmu_dictionary(file.path()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("good"));
    }

    #[tokio::test]
    async fn test_flat_ipa_parsing_uses_partition_search() {
        let file = temp_file("business\tbɪznɪs\tbusi-ness\ncat\tkæt\tcat\n");
        let partition = PartitionConfig::default();
        let entries = load_flat_ipa_dictionary(file.path(), &partition)
            .await
            .unwrap();

        let business = &entries["business"];
        assert_eq!(business.len(), 2);
        assert_eq!(business[0].joined(), "bɪz");
        assert_eq!(business[1].joined(), "nɪs");
        assert_eq!(entries["cat"].len(), 1);
    }

    #[test]
    fn test_order_by_frequency_appends_unranked_tail() {
        let mut pronunciations: IndexMap<String, Vec<Syllable>> = IndexMap::new();
        for word in ["zebra", "the", "cat"] {
            pronunciations.insert(
                word.to_string(),
                vec![Syllable::new(crate::phonology::phoneme::seq_from_symbols(&["æ"]))],
            );
        }
        let frequency = vec!["the".to_string(), "cat".to_string(), "missing".to_string()];
        let corpus = order_by_frequency(&frequency, pronunciations);

        let order: Vec<&str> = corpus.iter().map(|(word, _)| word).collect();
        assert_eq!(order, vec!["the", "cat", "zebra"]);
    }

    #[test]
    fn test_alternate_pronunciation_detection() {
        assert!(is_alternate_pronunciation("WORD(2)"));
        assert!(is_alternate_pronunciation("A(10)"));
        assert!(!is_alternate_pronunciation("WORD"));
        assert!(!is_alternate_pronunciation("WORD(X)"));
    }
}
