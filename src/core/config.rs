//! Configuration types and management for monosyl-rs.
//!
//! Every empirically tuned constant in the pipeline lives here rather than as
//! an inline literal: the scoring bonuses, the minimum-support threshold for
//! graph transitions, the bounded-retry caps, and the partition heuristic
//! weights. The defaults are the canonical values the output tables were tuned
//! against; changing them changes the generated language.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{MonosylError, Result};

/// Main configuration for the monosyllabic pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonosylConfig {
    /// Random syllable generation settings
    pub generation: GenerationConfig,

    /// Candidate scoring weights and thresholds
    pub scoring: ScoringConfig,

    /// Syllable boundary search heuristic weights
    pub partition: PartitionConfig,

    /// Assignment engine settings
    pub assignment: AssignmentConfig,

    /// Input/output file locations
    pub io: IoConfig,

    /// Optional behavior switches
    #[serde(default)]
    pub features: FeaturesConfig,
}

impl Default for MonosylConfig {
    fn default() -> Self {
        Self::new_with_defaults()
    }
}

impl MonosylConfig {
    /// Construct a configuration using the canonical default values used
    /// across the CLI and library layers. Keeping this in one place prevents
    /// the configuration surfaces from drifting apart.
    pub(crate) fn new_with_defaults() -> Self {
        Self {
            generation: GenerationConfig::default(),
            scoring: ScoringConfig::default(),
            partition: PartitionConfig::default(),
            assignment: AssignmentConfig::default(),
            io: IoConfig::default(),
            features: FeaturesConfig::default(),
        }
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            MonosylError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            MonosylError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Serialize the configuration as a YAML string.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.generation.word_frequency_cutoff == 0 {
            return Err(MonosylError::config_field(
                "frequency cutoff must be positive",
                "generation.word_frequency_cutoff",
            ));
        }
        if self.assignment.max_graph_attempts == 0 {
            return Err(MonosylError::config_field(
                "graph generation needs at least one attempt",
                "assignment.max_graph_attempts",
            ));
        }
        if !(0.0..=1.0).contains(&self.scoring.position_penalty) {
            return Err(MonosylError::config_field(
                "position penalty must be in [0, 1]",
                "scoring.position_penalty",
            ));
        }
        if !(0.0..=1.0).contains(&self.scoring.palette_order_decay) {
            return Err(MonosylError::config_field(
                "palette order decay must be in [0, 1]",
                "scoring.palette_order_decay",
            ));
        }
        let mut last = -1.0_f64;
        for &(fraction, _) in &self.scoring.choice_cutoffs {
            if fraction < last {
                return Err(MonosylError::config_field(
                    "choice cutoff fractions must be non-decreasing",
                    "scoring.choice_cutoffs",
                ));
            }
            last = fraction;
        }
        Ok(())
    }
}

/// Settings for bulk random syllable generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Total attempts for bulk generation. Many attempts are repeats;
    /// 100 million typically yields ~150,000 unique syllables with
    /// variations, enough to cover the dictionary.
    pub attempts: u64,

    /// How many words of the frequency list to keep.
    pub word_frequency_cutoff: usize,

    /// Seed for the random source. `None` seeds from entropy; set it for
    /// reproducible runs.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            attempts: 100_000_000,
            word_frequency_cutoff: 60_000,
            seed: None,
        }
    }
}

/// Candidate scoring weights shared by the variant pass and the choice
/// fallback, plus the graph transition thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score for a candidate phoneme present in the target word.
    pub perfect_match: f64,

    /// Score for a candidate phoneme in the same articulatory similarity
    /// group as some target phoneme.
    pub similar_match: f64,

    /// Penalty for a candidate phoneme with no counterpart in the target.
    pub missing_penalty: f64,

    /// Coefficient of the positional misalignment decay. A matched phoneme's
    /// score is divided by `1 + position_penalty * distance`.
    pub position_penalty: f64,

    /// Transition counts at or below this value are not trusted when
    /// inserting variant markers or filtering palette edges. Keeps `zz` and
    /// similar junk insertions out.
    pub min_transition_support: u32,

    /// Decay applied to palette weights under order-preserving generation:
    /// the weight of the k-th palette phoneme is multiplied by
    /// `(1 - palette_order_decay)^k`.
    pub palette_order_decay: f64,

    /// Progressive early-exit cutoffs for the choice fallback, as
    /// `(pool fraction scanned, per-phoneme score)` pairs. Scanning past a
    /// fraction relaxes the bar for taking a candidate immediately.
    pub choice_cutoffs: Vec<(f64, f64)>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            perfect_match: 10.0,
            similar_match: 4.0,
            missing_penalty: -4.0,
            position_penalty: 0.3,
            min_transition_support: 2,
            palette_order_decay: 0.4,
            choice_cutoffs: vec![(0.0, 8.0), (0.2, 7.0), (0.3, 6.0)],
        }
    }
}

impl ScoringConfig {
    /// The choice cutoff applicable after scanning `fraction` of the pool.
    pub fn choice_cutoff(&self, fraction: f64) -> f64 {
        let mut cutoff = f64::INFINITY;
        for &(threshold, value) in &self.choice_cutoffs {
            if fraction >= threshold {
                cutoff = value;
            }
        }
        cutoff
    }
}

/// Weights for the syllable boundary partition scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Bonus when a group start coincides with a stress or boundary marker
    /// from the source transcription.
    pub marker_alignment_bonus: f64,

    /// Penalty for a group made only of consonant-class phonemes.
    pub consonant_cluster_penalty: f64,

    /// Multiplier of the squared difference between a group's phoneme count
    /// and the reference syllable's letter count.
    pub length_mismatch_penalty: f64,

    /// Bonus for plausible consonant-vowel shapes (CV, VC, CVC, V, C).
    pub shape_bonus: f64,

    /// Bonus when every phoneme in a group maps to a substring of the
    /// reference spelling, consumed left-to-right.
    pub correlate_full_bonus: f64,

    /// Per-phoneme bonus for a correlate present anywhere in the reference
    /// spelling.
    pub correlate_partial_bonus: f64,

    /// Penalty for an r-like or g-like phoneme isolated as a whole group,
    /// unless the reference syllables isolate it too.
    pub isolated_phoneme_penalty: f64,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            marker_alignment_bonus: 6.0,
            consonant_cluster_penalty: 8.0,
            length_mismatch_penalty: 1.0,
            shape_bonus: 3.0,
            correlate_full_bonus: 10.0,
            correlate_partial_bonus: 1.5,
            isolated_phoneme_penalty: 4.0,
        }
    }
}

/// Assignment engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentConfig {
    /// Cap on palette-restricted generation attempts per word and strategy.
    /// Purely bounds wasted work against a heavily restricted graph; not a
    /// correctness mechanism.
    pub max_graph_attempts: u32,

    /// Window size for the rolling success-rate statistic.
    pub rolling_window: usize,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            max_graph_attempts: 1000,
            rolling_window: 1000,
        }
    }
}

/// Dictionary input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PronunciationFormat {
    /// ARPABET dictionary with `.`-separated syllables (cmudict-syl style).
    CmuSyllabified,
    /// Flat IPA transcriptions with a hyphenated reference spelling; syllable
    /// boundaries are recovered by the partition search.
    FlatIpa,
}

/// Input and output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    /// Word frequency list, most common first (word, tab, payload).
    pub word_frequency_list: PathBuf,

    /// Pronunciation dictionary.
    pub pronunciation_list: PathBuf,

    /// How to interpret `pronunciation_list`.
    pub pronunciation_format: PronunciationFormat,

    /// Cache of the syllabified IPA corpus.
    pub syllabized_cache: PathBuf,

    /// Cache of the built sonority graph.
    pub graph_cache: PathBuf,

    /// Cache of the generated candidate pool.
    pub pool_cache: PathBuf,

    /// Graphviz rendering of the sonority graph, for the external visualizer.
    pub graph_dot: PathBuf,

    /// The final word → monosyllable table consumed by the UI.
    pub output: PathBuf,

    /// Collision diagnostics.
    pub duplicates: PathBuf,

    /// Run summary statistics.
    pub summary: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            word_frequency_list: PathBuf::from("inputs/word_frequency.txt"),
            pronunciation_list: PathBuf::from("inputs/cmudict.0.6-syl.txt"),
            pronunciation_format: PronunciationFormat::CmuSyllabified,
            syllabized_cache: PathBuf::from("outputs/syllabized_ipa.json"),
            graph_cache: PathBuf::from("outputs/sonority_graph.bin"),
            pool_cache: PathBuf::from("outputs/random_generated_syllables_with_variations.json"),
            graph_dot: PathBuf::from("outputs/sonority_graph.dot"),
            output: PathBuf::from("outputs/monosyllabic.json"),
            duplicates: PathBuf::from("outputs/duplicates.json"),
            summary: PathBuf::from("outputs/summary.json"),
        }
    }
}

/// Optional behavior switches, settable from the CLI feature-flag list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Permit reuse of already-claimed phonetic forms, producing homonyms
    /// the way natural English does ("there"/"their").
    pub homonyms: bool,
}

impl FeaturesConfig {
    /// Enable a feature by its CLI name.
    pub fn enable(&mut self, name: &str) -> Result<()> {
        match name {
            "homonyms" => {
                self.homonyms = true;
                Ok(())
            }
            other => Err(MonosylError::config_field(
                format!("unknown feature flag '{other}'"),
                "features",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_canonical() {
        let config = MonosylConfig::default();
        assert_eq!(config.scoring.perfect_match, 10.0);
        assert_eq!(config.scoring.similar_match, 4.0);
        assert_eq!(config.scoring.missing_penalty, -4.0);
        assert_eq!(config.scoring.min_transition_support, 2);
        assert_eq!(config.assignment.max_graph_attempts, 1000);
        assert_eq!(config.generation.word_frequency_cutoff, 60_000);
        config.validate().unwrap();
    }

    #[test]
    fn test_choice_cutoff_progression() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.choice_cutoff(0.0), 8.0);
        assert_eq!(scoring.choice_cutoff(0.1), 8.0);
        assert_eq!(scoring.choice_cutoff(0.25), 7.0);
        assert_eq!(scoring.choice_cutoff(0.9), 6.0);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = MonosylConfig::default();
        let yaml = config.to_yaml_string().unwrap();
        let parsed: MonosylConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.scoring.position_penalty, config.scoring.position_penalty);
        assert_eq!(parsed.io.output, config.io.output);
    }

    #[test]
    fn test_unknown_feature_flag_rejected() {
        let mut features = FeaturesConfig::default();
        assert!(features.enable("homonyms").is_ok());
        assert!(features.enable("telepathy").is_err());
    }

    #[test]
    fn test_validation_rejects_bad_penalty() {
        let mut config = MonosylConfig::default();
        config.scoring.position_penalty = 1.5;
        assert!(config.validate().is_err());
    }
}
