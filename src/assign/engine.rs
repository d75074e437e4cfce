//! The multi-pass assignment engine.
//!
//! Consumes the frequency-ordered corpus, the sonority graph, and the
//! pre-generated candidate pool, and produces one assignment record per word:
//!
//! - **Pass 0** hands every already-monosyllabic word its own form, then
//!   promotes generated variant forms onto that word's real English variants
//!   so e.g. "jump"/"jumping" stay phonetically related.
//! - **Pass 1** matches multi-syllable words that have English variant
//!   siblings against pool candidates carrying exactly the same variant
//!   signature, assigning the whole family in one atomic step.
//! - **Pass 2** walks the remaining words through a strict fallback chain:
//!   direct → graphOrdered → graphRemoved → graph → choice → random → failed.
//!
//! Words are processed strictly in frequency order; the greedy
//! mutate-as-you-go pool makes results order-dependent by design, so common
//! words get first pick.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::assign::session::AssignmentSession;
use crate::assign::variants::{english_variants, VariantSignature};
use crate::core::config::{MonosylConfig, ScoringConfig};
use crate::graph::generate::CandidatePool;
use crate::graph::sonority::{PaletteOptions, SonorityGraph};
use crate::phonology::phoneme::{joined, Phoneme, PhonemeSeq};
use crate::phonology::syllable::{Corpus, Syllable};

/// How an assignment was produced. Documents provenance in the output table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum AssignMethod {
    Direct,
    Variant,
    SingleSyllableVariant,
    Graph,
    GraphOrdered,
    GraphRemoved,
    Choice,
    Random,
    Failed,
    AlreadyOneSyllable,
}

impl AssignMethod {
    /// The output tag for this method.
    pub fn tag(self) -> &'static str {
        match self {
            AssignMethod::Direct => "direct",
            AssignMethod::Variant => "variant",
            AssignMethod::SingleSyllableVariant => "singleSyllableVariant",
            AssignMethod::Graph => "graph",
            AssignMethod::GraphOrdered => "graphOrdered",
            AssignMethod::GraphRemoved => "graphRemoved",
            AssignMethod::Choice => "choice",
            AssignMethod::Random => "random",
            AssignMethod::Failed => "failed",
            AssignMethod::AlreadyOneSyllable => "alreadyOneSyllable",
        }
    }
}

/// One word's final assignment. Written once, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// The assigned monosyllabic phonetic form (or the bracketed placeholder
    /// for failures).
    pub form: String,
    /// Provenance of the assignment.
    pub method: AssignMethod,
    /// The word's original syllable count.
    pub syllable_count: usize,
}

/// A phonetic-form collision, reported for manual review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateEntry {
    /// The later word that collided.
    pub word: String,
    /// The contested phonetic form.
    pub form: String,
    /// The word that claimed the form first.
    pub first_word: String,
}

/// Aggregate statistics for a completed assignment run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentStats {
    /// Words processed.
    pub total_words: usize,
    /// Words that were already one syllable.
    pub already_monosyllabic: usize,
    /// Words that exhausted every strategy.
    pub failed: usize,
    /// Total syllables removed from the language.
    pub syllables_eliminated: usize,
    /// Assignment counts per method tag.
    pub method_counts: BTreeMap<String, usize>,
    /// Fraction of successful assignments per rolling window of
    /// multi-syllable words, in corpus order.
    pub rolling_success: Vec<f64>,
    /// Candidates left in the pool when the run finished.
    pub pool_remaining: usize,
}

/// Everything a run produces: the per-word records, the collision report,
/// and the statistics.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    /// Word → assignment record.
    pub records: IndexMap<String, AssignmentRecord>,
    /// Detected phonetic-form collisions.
    pub duplicates: Vec<DuplicateEntry>,
    /// Aggregate statistics.
    pub stats: AssignmentStats,
}

/// Score a candidate syllable against a target word's phonemes.
///
/// Each candidate phoneme earns the full bonus if it occurs anywhere in the
/// target, partial credit if it shares an articulatory similarity group with
/// some target phoneme, and a penalty otherwise. Matched contributions decay
/// with the index distance to the nearest matching target position, which
/// penalizes reordering.
pub fn score_candidate(
    candidate: &[Phoneme],
    target: &[Phoneme],
    scoring: &ScoringConfig,
) -> f64 {
    let mut total = 0.0;
    for (index, phoneme) in candidate.iter().enumerate() {
        let nearest = |matches: &mut dyn Iterator<Item = usize>| -> Option<i64> {
            matches
                .map(|j| (j as i64 - index as i64).abs())
                .min()
        };

        let exact = nearest(
            &mut target
                .iter()
                .enumerate()
                .filter(|(_, t)| *t == phoneme)
                .map(|(j, _)| j),
        );
        if let Some(distance) = exact {
            total += scoring.perfect_match
                / (1.0 + scoring.position_penalty * distance as f64);
            continue;
        }

        let similar = nearest(
            &mut target
                .iter()
                .enumerate()
                .filter(|(_, t)| phoneme.is_similar_to(**t))
                .map(|(j, _)| j),
        );
        if let Some(distance) = similar {
            total += scoring.similar_match
                / (1.0 + scoring.position_penalty * distance as f64);
            continue;
        }

        total += scoring.missing_penalty;
    }
    total
}

/// The assignment orchestrator. Borrows the read-only inputs; all run state
/// lives in the [`AssignmentSession`] it creates.
pub struct AssignmentEngine<'a> {
    config: &'a MonosylConfig,
    graph: &'a SonorityGraph,
    corpus: &'a Corpus,
}

impl<'a> AssignmentEngine<'a> {
    /// Create an engine over the corpus and graph.
    pub fn new(config: &'a MonosylConfig, graph: &'a SonorityGraph, corpus: &'a Corpus) -> Self {
        Self {
            config,
            graph,
            corpus,
        }
    }

    /// Run every pass and produce one record per word.
    pub fn assign_all(&self, pool: CandidatePool) -> AssignmentOutcome {
        let seed = self.config.generation.seed.unwrap_or_else(rand::random);
        let rng = StdRng::seed_from_u64(seed);
        let mut session =
            AssignmentSession::new(pool, rng, self.config.features.homonyms);
        let mut records: IndexMap<String, AssignmentRecord> = IndexMap::new();

        self.pass_single_syllables(&mut session, &mut records);
        info!(assigned = records.len(), "pass 0 complete (single syllables)");

        self.pass_variant_families(&mut session, &mut records);
        info!(assigned = records.len(), "pass 1 complete (variant families)");

        self.pass_fallback_chain(&mut session, &mut records);
        info!(assigned = records.len(), "pass 2 complete (fallback chain)");

        let duplicates = self.sweep_duplicates(&records);
        let stats = self.collect_stats(&records, &duplicates, &session);

        AssignmentOutcome {
            records,
            duplicates,
            stats,
        }
    }

    /// Pass 0: already-monosyllabic words keep their own form; their real
    /// English variants are promoted onto generated variant forms when the
    /// pool carries a matching candidate.
    fn pass_single_syllables(
        &self,
        session: &mut AssignmentSession,
        records: &mut IndexMap<String, AssignmentRecord>,
    ) {
        for (word, syllables) in self.corpus.iter() {
            if syllables.len() != 1 {
                continue;
            }
            let form = syllables[0].joined();
            records.insert(
                word.to_string(),
                AssignmentRecord {
                    form: form.clone(),
                    method: AssignMethod::AlreadyOneSyllable,
                    syllable_count: 1,
                },
            );
            session.claim(form.clone());

            let siblings = english_variants(word, self.corpus);
            if siblings.is_empty() {
                continue;
            }
            let Some(candidate) = session.pool.get(&form) else {
                continue;
            };
            let Some(variations) = candidate.variations.clone() else {
                continue;
            };

            let mut promoted = false;
            for (category, sibling) in siblings {
                if records.contains_key(&sibling) {
                    continue;
                }
                let Some(variant) = variations.get(&category) else {
                    continue;
                };
                let variant_form = joined(variant);
                if !session.is_available(&variant_form) {
                    continue;
                }
                let sibling_count = self
                    .corpus
                    .get(&sibling)
                    .map_or(1, <[Syllable]>::len);
                debug!(base = word, variant = %sibling, form = %variant_form, "promoted single-syllable variant");
                records.insert(
                    sibling,
                    AssignmentRecord {
                        form: variant_form.clone(),
                        method: AssignMethod::SingleSyllableVariant,
                        syllable_count: sibling_count,
                    },
                );
                session.claim(variant_form);
                promoted = true;
            }
            if promoted {
                session.take_candidate(&form);
            }
        }
    }

    /// Pass 1: multi-syllable words with detected English variants are
    /// matched against the pool bucket sharing their exact variant
    /// signature; the winning candidate and all its linked variant forms are
    /// assigned to the family in one atomic step.
    fn pass_variant_families(
        &self,
        session: &mut AssignmentSession,
        records: &mut IndexMap<String, AssignmentRecord>,
    ) {
        let scoring = &self.config.scoring;
        let words: Vec<String> = self
            .corpus
            .iter()
            .filter(|(word, syllables)| syllables.len() > 1 && !records.contains_key(*word))
            .map(|(word, _)| word.to_string())
            .collect();

        for word in words {
            if records.contains_key(&word) {
                // Assigned earlier in this pass as a sibling.
                continue;
            }
            let siblings = english_variants(&word, self.corpus);
            if siblings.is_empty() {
                continue;
            }
            let signature =
                VariantSignature::from_categories(siblings.iter().map(|(c, _)| *c));
            let target = self.flat_phonemes(&word);

            let mut best: Option<(f64, String)> = None;
            for form in session.bucket(signature) {
                let Some(candidate) = session.pool.get(form) else {
                    continue;
                };
                if !session.homonyms {
                    if session.is_claimed(form) {
                        continue;
                    }
                    let any_variant_claimed = candidate
                        .variations
                        .iter()
                        .flat_map(|map| map.values())
                        .any(|variant| session.is_claimed(&joined(variant)));
                    if any_variant_claimed {
                        continue;
                    }
                }
                let score = score_candidate(&candidate.syllable, &target, scoring);
                let is_better = best.as_ref().map_or(true, |(b, _)| score > *b);
                if is_better {
                    let perfect = scoring.perfect_match * candidate.syllable.len() as f64;
                    best = Some((score, form.clone()));
                    if score >= perfect {
                        break;
                    }
                }
            }

            let Some((_, form)) = best else {
                continue;
            };
            let Some(candidate) = session.take_candidate(&form) else {
                continue;
            };

            let syllable_count = self.corpus.get(&word).map_or(1, <[Syllable]>::len);
            records.insert(
                word.clone(),
                AssignmentRecord {
                    form: form.clone(),
                    method: AssignMethod::Variant,
                    syllable_count,
                },
            );
            session.claim(form);

            if let Some(variations) = candidate.variations {
                for (category, sibling) in siblings {
                    if records.contains_key(&sibling) {
                        continue;
                    }
                    let Some(variant) = variations.get(&category) else {
                        // The bucket guarantees matching signatures, so a
                        // missing form here means the pool data is
                        // inconsistent with its index.
                        warn!(word = %sibling, category = ?category, "detected variant has no generated form");
                        continue;
                    };
                    let variant_form = joined(variant);
                    if !session.is_available(&variant_form) {
                        continue;
                    }
                    let sibling_count =
                        self.corpus.get(&sibling).map_or(1, <[Syllable]>::len);
                    records.insert(
                        sibling,
                        AssignmentRecord {
                            form: variant_form.clone(),
                            method: AssignMethod::Variant,
                            syllable_count: sibling_count,
                        },
                    );
                    session.claim(variant_form);
                }
            }
        }
    }

    /// Pass 2: every remaining multi-syllable word runs the strict fallback
    /// chain, stopping at the first success. Every word gets *some* record.
    fn pass_fallback_chain(
        &self,
        session: &mut AssignmentSession,
        records: &mut IndexMap<String, AssignmentRecord>,
    ) {
        let words: Vec<String> = self
            .corpus
            .iter()
            .filter(|(word, syllables)| syllables.len() > 1 && !records.contains_key(*word))
            .map(|(word, _)| word.to_string())
            .collect();

        for word in words {
            let syllables = self.corpus.get(&word).unwrap_or(&[]);
            let target = self.flat_phonemes(&word);
            let (form, method) = self.assign_one(&word, syllables, &target, session);

            if method != AssignMethod::Failed {
                session.claim(form.clone());
            }
            records.insert(
                word,
                AssignmentRecord {
                    form,
                    method,
                    syllable_count: syllables.len(),
                },
            );
        }
    }

    /// The fallback chain for one word.
    fn assign_one(
        &self,
        word: &str,
        syllables: &[Syllable],
        target: &[Phoneme],
        session: &mut AssignmentSession,
    ) -> (String, AssignMethod) {
        // 1. direct: one of the word's own syllables, if free.
        for syllable in syllables {
            let form = syllable.joined();
            if session.is_available(&form) {
                return (form, AssignMethod::Direct);
            }
        }

        // 2-4. graph generation restricted to the word's own phonemes, with
        // progressively looser ordering constraints.
        let strategies: [(AssignMethod, bool, bool); 3] = [
            (AssignMethod::GraphOrdered, true, false),
            (AssignMethod::GraphRemoved, false, true),
            (AssignMethod::Graph, false, false),
        ];
        for (method, force_order, use_once) in strategies {
            let options = PaletteOptions {
                force_order,
                use_once,
                min_support: self.config.scoring.min_transition_support,
                order_decay: self.config.scoring.palette_order_decay,
            };
            for _ in 0..self.config.assignment.max_graph_attempts {
                let Some(generated) = self.graph.random_syllable_from_palette(
                    &mut session.rng,
                    target,
                    &options,
                ) else {
                    // Dead end or too short; the attempt cap bounds the
                    // wasted work against a heavily restricted graph.
                    continue;
                };
                let form = joined(&generated);
                if session.is_available(&form) {
                    return (form, method);
                }
            }
        }

        // 5. choice: scan the remaining pool for the best-scoring candidate.
        if let Some(form) = self.choose_from_pool(target, session) {
            session.take_candidate(&form);
            return (form, AssignMethod::Choice);
        }

        // 6. random: the first remaining candidate at all.
        let first_free = session
            .pool
            .iter()
            .find(|(form, _)| session.is_available(form))
            .map(|(form, _)| form.clone());
        if let Some(form) = first_free {
            session.take_candidate(&form);
            return (form, AssignMethod::Random);
        }

        // 7. failed: bracket the word so the output still has an entry.
        warn!(word, "no assignment strategy succeeded");
        (format!("[{word}]"), AssignMethod::Failed)
    }

    /// Scan the pool in order, scoring each candidate against the target and
    /// early-exiting once a candidate clears the progressive cutoff for the
    /// fraction of the pool scanned so far. Falls back to the best positive
    /// score seen.
    fn choose_from_pool(
        &self,
        target: &[Phoneme],
        session: &AssignmentSession,
    ) -> Option<String> {
        let scoring = &self.config.scoring;
        let pool_len = session.pool.len();
        if pool_len == 0 {
            return None;
        }

        let mut best: Option<(f64, String)> = None;
        for (index, (form, candidate)) in session.pool.iter().enumerate() {
            if !session.is_available(form) {
                continue;
            }
            let score = score_candidate(&candidate.syllable, target, scoring);
            let cutoff = scoring.choice_cutoff(index as f64 / pool_len as f64)
                * candidate.syllable.len() as f64;
            if score >= cutoff {
                return Some(form.clone());
            }
            if score > 0.0 && best.as_ref().map_or(true, |(b, _)| score > *b) {
                best = Some((score, form.clone()));
            }
        }
        best.map(|(_, form)| form)
    }

    /// Flat phoneme sequence of a corpus word.
    fn flat_phonemes(&self, word: &str) -> PhonemeSeq {
        self.corpus
            .get(word)
            .into_iter()
            .flatten()
            .flat_map(|syllable| syllable.phonemes.iter().copied())
            .collect()
    }

    /// Detect phonetic-form collisions among all non-alreadyOneSyllable
    /// assignments. Duplicates are tolerated (and expected under homonym
    /// mode) but always reported.
    fn sweep_duplicates(
        &self,
        records: &IndexMap<String, AssignmentRecord>,
    ) -> Vec<DuplicateEntry> {
        let mut first_claim: IndexMap<&str, &str> = IndexMap::new();
        let mut duplicates = Vec::new();
        for (word, record) in records {
            if record.method == AssignMethod::AlreadyOneSyllable {
                continue;
            }
            match first_claim.get(record.form.as_str()) {
                None => {
                    first_claim.insert(record.form.as_str(), word.as_str());
                }
                Some(first_word) => {
                    warn!(word = %word, form = %record.form, first = %first_word, "duplicate phonetic form");
                    duplicates.push(DuplicateEntry {
                        word: word.clone(),
                        form: record.form.clone(),
                        first_word: (*first_word).to_string(),
                    });
                }
            }
        }
        duplicates
    }

    /// Aggregate the run statistics.
    fn collect_stats(
        &self,
        records: &IndexMap<String, AssignmentRecord>,
        duplicates: &[DuplicateEntry],
        session: &AssignmentSession,
    ) -> AssignmentStats {
        let mut stats = AssignmentStats {
            total_words: records.len(),
            pool_remaining: session.pool.len(),
            ..AssignmentStats::default()
        };

        for record in records.values() {
            *stats
                .method_counts
                .entry(record.method.tag().to_string())
                .or_insert(0) += 1;
            match record.method {
                AssignMethod::AlreadyOneSyllable => stats.already_monosyllabic += 1,
                AssignMethod::Failed => stats.failed += 1,
                _ => stats.syllables_eliminated += record.syllable_count.saturating_sub(1),
            }
        }

        // Rolling success over multi-syllable words in corpus order.
        let window = self.config.assignment.rolling_window.max(1);
        let outcomes: Vec<bool> = self
            .corpus
            .iter()
            .filter(|(_, syllables)| syllables.len() > 1)
            .filter_map(|(word, _)| records.get(word))
            .map(|record| record.method != AssignMethod::Failed)
            .collect();
        stats.rolling_success = outcomes
            .chunks(window)
            .map(|chunk| {
                chunk.iter().filter(|ok| **ok).count() as f64 / chunk.len() as f64
            })
            .collect();

        if !duplicates.is_empty() {
            info!(count = duplicates.len(), "phonetic-form collisions recorded");
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::assign::variants::VariantCategory;
    use crate::graph::generate::CandidateSyllable;
    use crate::phonology::phoneme::seq_from_symbols;

    fn syllable(symbols: &[&str]) -> Syllable {
        Syllable::new(seq_from_symbols(symbols))
    }

    fn config_with_seed() -> MonosylConfig {
        let mut config = MonosylConfig::default();
        config.generation.seed = Some(99);
        config
    }

    #[test]
    fn test_scoring_perfect_and_similar_and_missing() {
        let scoring = ScoringConfig::default();
        let target = seq_from_symbols(&["b", "ɪ", "z"]);

        // Identical candidate at identical positions: full marks.
        let same = score_candidate(&target, &target, &scoring);
        assert!((same - 30.0).abs() < 1e-9);

        // /p/ is similar to /b/; positional distance zero.
        let similar = seq_from_symbols(&["p", "ɪ", "z"]);
        let score = score_candidate(&similar, &target, &scoring);
        assert!((score - 24.0).abs() < 1e-9);

        // /u/ matches nothing in the target.
        let missing = seq_from_symbols(&["u"]);
        let score = score_candidate(&missing, &target, &scoring);
        assert!((score - scoring.missing_penalty).abs() < 1e-9);
    }

    #[test]
    fn test_scoring_penalizes_reordering() {
        let scoring = ScoringConfig::default();
        let target = seq_from_symbols(&["b", "ɪ", "z"]);
        let reordered = seq_from_symbols(&["z", "ɪ", "b"]);
        let aligned = score_candidate(&target, &target, &scoring);
        let shuffled = score_candidate(&reordered, &target, &scoring);
        assert!(shuffled < aligned);
        assert!(shuffled > 0.0);
    }

    #[test]
    fn test_single_syllable_words_keep_their_form() {
        let mut corpus = Corpus::new();
        corpus.push("cat", vec![syllable(&["k", "æ", "t"])]);
        corpus.push("dog", vec![syllable(&["d", "ɔ", "ɡ"])]);
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let outcome = engine.assign_all(CandidatePool::new());
        let cat = &outcome.records["cat"];
        assert_eq!(cat.form, "kæt");
        assert_eq!(cat.method, AssignMethod::AlreadyOneSyllable);
        assert_eq!(outcome.stats.already_monosyllabic, 2);
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn test_direct_assignment_uses_own_syllable() {
        let mut corpus = Corpus::new();
        corpus.push(
            "business",
            vec![syllable(&["b", "ɪ", "z"]), syllable(&["n", "ɪ", "s"])],
        );
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let outcome = engine.assign_all(CandidatePool::new());
        let record = &outcome.records["business"];
        assert_eq!(record.form, "bɪz");
        assert_eq!(record.method, AssignMethod::Direct);
        assert_eq!(record.syllable_count, 2);
        assert_eq!(outcome.stats.syllables_eliminated, 1);
    }

    #[test]
    fn test_direct_skips_claimed_syllable() {
        let mut corpus = Corpus::new();
        corpus.push("biz", vec![syllable(&["b", "ɪ", "z"])]);
        corpus.push(
            "business",
            vec![syllable(&["b", "ɪ", "z"]), syllable(&["n", "ɪ", "s"])],
        );
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let outcome = engine.assign_all(CandidatePool::new());
        let record = &outcome.records["business"];
        assert_eq!(record.form, "nɪs");
        assert_eq!(record.method, AssignMethod::Direct);
    }

    #[test]
    fn test_exhausted_word_fails_with_bracketed_form() {
        // One multi-syllable word whose phonemes overlap nothing: direct is
        // claimed, the palette defeats the graph, and the pool is empty.
        let mut corpus = Corpus::new();
        corpus.push("ohoh", vec![syllable(&["oʊ"]), syllable(&["oʊ"])]);
        // Claim /oʊ/ via a single-syllable homograph first.
        corpus.push("oh", vec![syllable(&["oʊ"])]);
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let outcome = engine.assign_all(CandidatePool::new());
        let record = &outcome.records["ohoh"];
        assert_eq!(record.method, AssignMethod::Failed);
        assert_eq!(record.form, "[ohoh]");
        assert!(!record.form.is_empty());
        assert_eq!(outcome.stats.failed, 1);
    }

    #[test]
    fn test_choice_takes_best_scoring_candidate() {
        let mut corpus = Corpus::new();
        // A word whose own syllables are all claimed and whose palette the
        // graph cannot serve (no transitions cleared min support).
        corpus.push("vi", vec![syllable(&["v", "ɪ"])]);
        corpus.push("vivi", vec![syllable(&["v", "ɪ"]), syllable(&["v", "ɪ"])]);
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let mut pool = CandidatePool::new();
        pool.insert(
            "zuʒ".to_string(),
            CandidateSyllable {
                syllable: seq_from_symbols(&["z", "u", "ʒ"]),
                variations: None,
            },
        );
        pool.insert(
            "vɪm".to_string(),
            CandidateSyllable {
                syllable: seq_from_symbols(&["v", "ɪ", "m"]),
                variations: None,
            },
        );

        let outcome = engine.assign_all(pool);
        let record = &outcome.records["vivi"];
        // vɪm shares v and ɪ with the target; zuʒ shares nothing.
        assert_eq!(record.form, "vɪm");
        assert_eq!(record.method, AssignMethod::Choice);
    }

    #[test]
    fn test_random_takes_first_candidate_when_nothing_scores() {
        let mut corpus = Corpus::new();
        corpus.push("vi", vec![syllable(&["v", "ɪ"])]);
        corpus.push("vivi", vec![syllable(&["v", "ɪ"]), syllable(&["v", "ɪ"])]);
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let mut pool = CandidatePool::new();
        pool.insert(
            "zuʒ".to_string(),
            CandidateSyllable {
                syllable: seq_from_symbols(&["z", "u", "ʒ"]),
                variations: None,
            },
        );
        pool.insert(
            "ʒuz".to_string(),
            CandidateSyllable {
                syllable: seq_from_symbols(&["ʒ", "u", "z"]),
                variations: None,
            },
        );

        let outcome = engine.assign_all(pool);
        let record = &outcome.records["vivi"];
        assert_eq!(record.form, "zuʒ");
        assert_eq!(record.method, AssignMethod::Random);
        assert_eq!(outcome.stats.pool_remaining, 1);
    }

    #[test]
    fn test_single_syllable_variant_promotion() {
        let mut corpus = Corpus::new();
        corpus.push("jump", vec![syllable(&["dʒ", "ʌ", "m", "p"])]);
        corpus.push(
            "jumping",
            vec![syllable(&["dʒ", "ʌ", "m"]), syllable(&["p", "ɪ", "ŋ"])],
        );
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let mut variations = BTreeMap::new();
        variations.insert(
            VariantCategory::Gerund,
            seq_from_symbols(&["dʒ", "ʌ", "m", "p", "ŋ"]),
        );
        let mut pool = CandidatePool::new();
        pool.insert(
            "dʒʌmp".to_string(),
            CandidateSyllable {
                syllable: seq_from_symbols(&["dʒ", "ʌ", "m", "p"]),
                variations: Some(variations),
            },
        );

        let outcome = engine.assign_all(pool);
        let base = &outcome.records["jump"];
        assert_eq!(base.method, AssignMethod::AlreadyOneSyllable);
        assert_eq!(base.form, "dʒʌmp");

        let derived = &outcome.records["jumping"];
        assert_eq!(derived.method, AssignMethod::SingleSyllableVariant);
        assert_eq!(derived.form, "dʒʌmpŋ");
        assert_eq!(derived.syllable_count, 2);
        assert_eq!(outcome.stats.pool_remaining, 0);
    }

    #[test]
    fn test_variant_family_assigned_atomically() {
        let mut corpus = Corpus::new();
        corpus.push(
            "bubble",
            vec![syllable(&["b", "ʌ"]), syllable(&["b", "l̩"])],
        );
        corpus.push(
            "bubbles",
            vec![syllable(&["b", "ʌ"]), syllable(&["b", "l̩", "z"])],
        );
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let mut variations = BTreeMap::new();
        variations.insert(VariantCategory::Plural, seq_from_symbols(&["b", "ʌ", "b", "z"]));
        let mut pool = CandidatePool::new();
        pool.insert(
            "bʌb".to_string(),
            CandidateSyllable {
                syllable: seq_from_symbols(&["b", "ʌ", "b"]),
                variations: Some(variations),
            },
        );

        let outcome = engine.assign_all(pool);
        let base = &outcome.records["bubble"];
        assert_eq!(base.method, AssignMethod::Variant);
        assert_eq!(base.form, "bʌb");

        let plural = &outcome.records["bubbles"];
        assert_eq!(plural.method, AssignMethod::Variant);
        assert_eq!(plural.form, "bʌbz");
        assert_eq!(outcome.stats.pool_remaining, 0);
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn test_uniqueness_and_duplicate_sweep() {
        let mut corpus = Corpus::new();
        corpus.push("aba", vec![syllable(&["æ", "b"]), syllable(&["æ"])]);
        corpus.push("abab", vec![syllable(&["æ", "b"]), syllable(&["æ", "b"])]);
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let outcome = engine.assign_all(CandidatePool::new());
        let forms: Vec<&String> = outcome
            .records
            .values()
            .filter(|r| r.method != AssignMethod::AlreadyOneSyllable)
            .filter(|r| r.method != AssignMethod::Failed)
            .map(|r| &r.form)
            .collect();
        let mut deduped = forms.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(forms.len(), deduped.len(), "collision not reported");
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn test_every_corpus_word_gets_a_record() {
        let mut corpus = Corpus::new();
        corpus.push("cat", vec![syllable(&["k", "æ", "t"])]);
        corpus.push(
            "catty",
            vec![syllable(&["k", "æ", "t"]), syllable(&["i"])],
        );
        corpus.push(
            "attic",
            vec![syllable(&["æ"]), syllable(&["t", "ɪ", "k"])],
        );
        let graph = SonorityGraph::build(&corpus);
        let config = config_with_seed();
        let engine = AssignmentEngine::new(&config, &graph, &corpus);

        let outcome = engine.assign_all(CandidatePool::new());
        assert_eq!(outcome.records.len(), corpus.len());
        assert_eq!(outcome.stats.total_words, 3);
    }
}
