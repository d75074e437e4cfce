//! Mutable run state for one assignment pass.
//!
//! The seen set, the shrinking candidate pool, the signature buckets, and the
//! random source all live in an explicit session object owned by the engine
//! and passed by mutable borrow — never a module-level singleton — so the
//! engine stays testable and can run multiple times per process.

use ahash::{AHashMap, AHashSet};
use rand::rngs::StdRng;

use crate::assign::variants::VariantSignature;
use crate::graph::generate::{CandidatePool, CandidateSyllable};

/// Shared mutable state threaded through every assignment step.
///
/// Exactly one assignment may claim a given candidate; that is enforced by
/// deletion-on-use, not locking — the whole pass is single-threaded. The seen
/// set only ever grows.
pub struct AssignmentSession {
    /// Phoneme sequences already claimed by some assignment.
    pub seen: AHashSet<String>,
    /// Remaining candidates, insertion-ordered.
    pub pool: CandidatePool,
    /// Candidate forms indexed by their variation signature, for the
    /// variant-matching pass. Bucket order follows pool order.
    buckets: AHashMap<VariantSignature, Vec<String>>,
    /// Seedable random source for the graph fallback strategies.
    pub rng: StdRng,
    /// Whether claimed forms may be reused (homonym mode).
    pub homonyms: bool,
}

impl AssignmentSession {
    /// Build a session over a freshly loaded pool.
    pub fn new(pool: CandidatePool, rng: StdRng, homonyms: bool) -> Self {
        let mut buckets: AHashMap<VariantSignature, Vec<String>> = AHashMap::new();
        for (form, candidate) in pool.iter() {
            let signature = candidate.signature();
            if !signature.is_empty() {
                buckets.entry(signature).or_default().push(form.clone());
            }
        }
        Self {
            seen: AHashSet::new(),
            pool,
            buckets,
            rng,
            homonyms,
        }
    }

    /// Whether a form has been claimed already. Under homonym mode claimed
    /// forms are still reusable; callers combine this with
    /// [`homonyms`](Self::homonyms).
    pub fn is_claimed(&self, form: &str) -> bool {
        self.seen.contains(form)
    }

    /// Whether the form is free to assign under the current feature flags.
    pub fn is_available(&self, form: &str) -> bool {
        self.homonyms || !self.seen.contains(form)
    }

    /// Mark a form as claimed. Monotone: nothing is ever removed.
    pub fn claim(&mut self, form: String) {
        self.seen.insert(form);
    }

    /// Candidate forms sharing exactly this variation signature.
    pub fn bucket(&self, signature: VariantSignature) -> &[String] {
        self.buckets
            .get(&signature)
            .map_or(&[], Vec::as_slice)
    }

    /// Remove a candidate from the pool and from its signature bucket,
    /// returning it. After this the candidate cannot be chosen again.
    pub fn take_candidate(&mut self, form: &str) -> Option<CandidateSyllable> {
        let candidate = self.pool.remove(form)?;
        let signature = candidate.signature();
        if !signature.is_empty() {
            if let Some(bucket) = self.buckets.get_mut(&signature) {
                bucket.retain(|key| key != form);
            }
        }
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    use crate::assign::variants::VariantCategory;
    use crate::phonology::phoneme::seq_from_symbols;

    fn candidate(symbols: &[&str], plural: Option<&[&str]>) -> CandidateSyllable {
        let variations = plural.map(|symbols| {
            let mut map = BTreeMap::new();
            map.insert(VariantCategory::Plural, seq_from_symbols(symbols));
            map
        });
        CandidateSyllable {
            syllable: seq_from_symbols(symbols),
            variations,
        }
    }

    fn session_with(entries: Vec<(&str, CandidateSyllable)>) -> AssignmentSession {
        let mut pool = CandidatePool::new();
        for (form, cand) in entries {
            pool.insert(form.to_string(), cand);
        }
        AssignmentSession::new(pool, StdRng::seed_from_u64(0), false)
    }

    #[test]
    fn test_claim_is_monotone() {
        let mut session = session_with(vec![]);
        assert!(!session.is_claimed("bɪz"));
        session.claim("bɪz".to_string());
        assert!(session.is_claimed("bɪz"));
        assert!(!session.is_available("bɪz"));
    }

    #[test]
    fn test_homonym_mode_keeps_claimed_forms_available() {
        let mut session = session_with(vec![]);
        session.homonyms = true;
        session.claim("ðɛr".to_string());
        assert!(session.is_claimed("ðɛr"));
        assert!(session.is_available("ðɛr"));
    }

    #[test]
    fn test_take_candidate_empties_bucket() {
        let with_plural = candidate(&["b", "æ", "t"], Some(&["b", "æ", "t", "s"]));
        let signature = with_plural.signature();
        let mut session = session_with(vec![("bæt", with_plural)]);

        assert_eq!(session.bucket(signature).len(), 1);
        let taken = session.take_candidate("bæt").unwrap();
        assert_eq!(taken.syllable.len(), 3);
        assert!(session.bucket(signature).is_empty());
        assert!(session.pool.get("bæt").is_none());
        assert!(session.take_candidate("bæt").is_none());
    }

    #[test]
    fn test_bucket_requires_exact_signature() {
        let with_plural = candidate(&["b", "æ", "t"], Some(&["b", "æ", "t", "s"]));
        let session = session_with(vec![("bæt", with_plural)]);

        let plural_only = VariantSignature::from_categories([VariantCategory::Plural]);
        let plural_and_past = VariantSignature::from_categories([
            VariantCategory::Plural,
            VariantCategory::Past,
        ]);
        assert_eq!(session.bucket(plural_only).len(), 1);
        assert!(session.bucket(plural_and_past).is_empty());
    }
}
