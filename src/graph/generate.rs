//! Bulk candidate syllable generation.
//!
//! Runs the sonority graph's random walk a configured number of times (many
//! attempts are repeats) and keeps every unique syllable, annotated with the
//! morphological variations the variant generator can justify for it. The
//! resulting pool is what the assignment engine consumes — and deletes from —
//! during the main pass.

use ahash::AHashSet;
use indexmap::IndexMap;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assign::variants::{phonetic_alternatives, AlternativeMap, VariantSignature};
use crate::graph::sonority::SonorityGraph;
use crate::phonology::phoneme::{joined, PhonemeSeq};

/// A generated one-syllable form, optionally carrying derived variant forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSyllable {
    /// The phonemes of the candidate.
    pub syllable: PhonemeSeq,
    /// Category → derived phoneme sequence, when any insertion was legal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<AlternativeMap>,
}

impl CandidateSyllable {
    /// The signature of the variation categories this candidate carries.
    pub fn signature(&self) -> VariantSignature {
        match &self.variations {
            Some(map) => VariantSignature::from_categories(map.keys().copied()),
            None => VariantSignature::empty(),
        }
    }
}

/// Serialized pool form: an ordered list of (joined form, candidate) pairs.
pub type PersistedPool = Vec<(String, CandidateSyllable)>;

/// The shrinking pool of candidate syllables, keyed by joined form,
/// insertion-ordered. Candidates are removed as assignments claim them.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: IndexMap<String, CandidateSyllable>,
}

impl CandidatePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of candidates remaining.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the pool is exhausted.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether a form is present as a candidate key.
    pub fn contains(&self, form: &str) -> bool {
        self.candidates.contains_key(form)
    }

    /// Look up a candidate by its joined form.
    pub fn get(&self, form: &str) -> Option<&CandidateSyllable> {
        self.candidates.get(form)
    }

    /// Iterate candidates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CandidateSyllable)> {
        self.candidates.iter()
    }

    /// The first remaining candidate's form, if any.
    pub fn first_form(&self) -> Option<&String> {
        self.candidates.first().map(|(form, _)| form)
    }

    /// Remove and return a candidate, preserving the order of the rest.
    pub fn remove(&mut self, form: &str) -> Option<CandidateSyllable> {
        self.candidates.shift_remove(form)
    }

    /// Insert a candidate. Used by the builder and by cache loading.
    pub fn insert(&mut self, form: String, candidate: CandidateSyllable) {
        self.candidates.insert(form, candidate);
    }

    /// Convert to the serialized list form.
    pub fn to_persisted(&self) -> PersistedPool {
        self.candidates
            .iter()
            .map(|(form, candidate)| (form.clone(), candidate.clone()))
            .collect()
    }

    /// Rebuild a pool from its serialized form.
    pub fn from_persisted(entries: PersistedPool) -> Self {
        let mut pool = Self::new();
        for (form, candidate) in entries {
            pool.insert(form, candidate);
        }
        pool
    }
}

/// Generate the candidate pool: `attempts` random walks, deduplicated against
/// both the pool and every variation form handed out so far.
///
/// `min_support` gates the variant insertions (see
/// [`phonetic_alternatives`]). Pass `show_progress` for an interactive
/// progress bar during long runs.
pub fn build_candidate_pool(
    graph: &SonorityGraph,
    attempts: u64,
    min_support: u32,
    rng: &mut StdRng,
    show_progress: bool,
) -> CandidatePool {
    let mut candidates: IndexMap<String, CandidateSyllable> = IndexMap::new();
    let mut variation_forms: AHashSet<String> = AHashSet::new();
    let mut with_variations = 0u64;
    let mut without_variations = 0u64;

    let progress = if show_progress {
        let bar = ProgressBar::new(attempts);
        bar.set_style(
            ProgressStyle::with_template(
                "{bar:30} {percent}% {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    for attempt in 0..attempts {
        let syllable: PhonemeSeq = graph.random_syllable(rng);
        if syllable.is_empty() {
            continue;
        }
        let form = joined(&syllable);
        if candidates.contains_key(&form) || variation_forms.contains(&form) {
            continue;
        }

        let alternatives = phonetic_alternatives(&syllable, graph, min_support, |candidate| {
            candidates.contains_key(candidate) || variation_forms.contains(candidate)
        });

        let variations = if alternatives.is_empty() {
            without_variations += 1;
            None
        } else {
            with_variations += 1;
            for variant in alternatives.values() {
                variation_forms.insert(joined(variant));
            }
            Some(alternatives)
        };

        candidates.insert(form.clone(), CandidateSyllable { syllable, variations });

        if attempt % 1000 == 0 {
            progress.set_position(attempt);
            progress.set_message(format!("{} unique · {form}", candidates.len()));
        }
    }
    progress.finish_and_clear();

    info!(
        unique = candidates.len(),
        with_variations,
        without_variations,
        "generated candidate syllables"
    );

    CandidatePool { candidates }
}
