//! The sonority graph: a statistical model of phoneme transitions.
//!
//! Three connected sub-graphs — onset, nucleus, coda — each mapping a phoneme
//! (or the synthetic start marker) to a weighted list of successor edges.
//! Edges only point forward: within a part, into the next part, or to the
//! synthetic end marker. Counts accumulate over every syllable in the corpus,
//! so a random walk through the graph reproduces the phonotactics of real
//! English syllables.
//!
//! The graph is expensive to build (full corpus scan) and read-only
//! afterwards; [`to_persisted`](SonorityGraph::to_persisted) supports caching
//! it between runs.

use ahash::AHashMap;
use rand::rngs::StdRng;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::phonology::phoneme::{Phoneme, PhonemeSeq};
use crate::phonology::syllable::{split_parts, Corpus};

/// Number of sub-graphs: onset, nucleus, coda.
pub const PART_COUNT: usize = 3;

/// Index of the onset sub-graph.
pub const ONSET: usize = 0;
/// Index of the nucleus sub-graph.
pub const NUCLEUS: usize = 1;
/// Index of the coda sub-graph.
pub const CODA: usize = 2;

/// Maximum times a single phoneme may recur within one part of a generated
/// syllable. Prevents degenerate repeats like "ststs".
const MAX_PART_REPEATS: u32 = 2;

/// Edge key/target: `None` is the start marker (as a key, onset only) or the
/// end marker (as a target).
pub type Node = Option<Phoneme>;

/// One sub-graph: phoneme-or-start → weighted successor list.
///
/// A phoneme may be absent from this part even though an edge targets it; the
/// walk then looks it up in the next part.
#[derive(Debug, Clone, Default)]
pub struct GraphPart {
    edges: AHashMap<Node, Vec<(Node, u32)>>,
}

impl GraphPart {
    /// Record one observation of `from → to`, incrementing an existing edge
    /// rather than duplicating it.
    fn increment(&mut self, from: Node, to: Node) {
        let targets = self.edges.entry(from).or_default();
        match targets.iter_mut().find(|(target, _)| *target == to) {
            Some(edge) => edge.1 += 1,
            None => targets.push((to, 1)),
        }
    }

    /// Successor edges of a node, if the node belongs to this part.
    pub fn successors(&self, from: Node) -> Option<&[(Node, u32)]> {
        self.edges.get(&from).map(Vec::as_slice)
    }

    /// Whether the phoneme is a key in this part.
    pub fn contains(&self, phoneme: Phoneme) -> bool {
        self.edges.contains_key(&Some(phoneme))
    }

    /// Iterate all `(node, successor list)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Vec<(Node, u32)>)> {
        self.edges.iter()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the part has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Options for palette-constrained generation.
#[derive(Debug, Clone, Copy)]
pub struct PaletteOptions {
    /// Down-weight palette phonemes by their position so the generated
    /// syllable tends to keep the original ordering.
    pub force_order: bool,
    /// Remove a palette phoneme once used so it cannot repeat.
    pub use_once: bool,
    /// Edges with counts at or below this are not followed.
    pub min_support: u32,
    /// Decay applied per palette position under `force_order`.
    pub order_decay: f64,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            force_order: false,
            use_once: false,
            min_support: 2,
            order_decay: 0.4,
        }
    }
}

/// The learned transition model over onset, nucleus, and coda.
#[derive(Debug, Clone, Default)]
pub struct SonorityGraph {
    /// The three sub-graphs, in walk order.
    pub parts: [GraphPart; PART_COUNT],
}

impl SonorityGraph {
    /// Build the graph from every syllable in the corpus.
    ///
    /// Syllables that fail the onset/nucleus/coda decomposition contribute
    /// only a degenerate start edge, matching how sparse real data is
    /// tallied, and are otherwise skipped.
    pub fn build(corpus: &Corpus) -> Self {
        let mut graph = Self::default();
        for syllable in corpus.syllables() {
            graph.observe(&syllable.phonemes);
        }
        graph
    }

    /// Record a single syllable's transitions.
    pub fn observe(&mut self, phonemes: &[Phoneme]) {
        let parts = split_parts(phonemes);
        let onset_first = parts.onset.first().copied();
        let nucleus_first = parts.nucleus.first().copied();
        let coda_first = parts.coda.first().copied();

        // Start marker: into the onset, or straight into the nucleus when
        // the onset is empty.
        self.parts[ONSET].increment(None, onset_first.or(nucleus_first));

        Self::chain(&mut self.parts[ONSET], &parts.onset, nucleus_first);
        Self::chain(&mut self.parts[NUCLEUS], &parts.nucleus, coda_first);
        Self::chain(&mut self.parts[CODA], &parts.coda, None);
    }

    /// Walk `letters` left to right, recording each adjacent transition and a
    /// final edge into `next_part` (or the end marker).
    fn chain(part: &mut GraphPart, letters: &[Phoneme], next_part: Node) {
        let Some(&first) = letters.first() else {
            return;
        };
        let mut current = first;
        for &next in letters[1..].iter() {
            part.increment(Some(current), Some(next));
            current = next;
        }
        part.increment(Some(current), next_part);
    }

    /// Generate a random syllable by weighted walk start → onset… →
    /// nucleus… → coda… → end. Edge probability is proportional to stored
    /// counts; no phoneme recurs more than twice within one part.
    pub fn random_syllable(&self, rng: &mut StdRng) -> PhonemeSeq {
        let mut result = PhonemeSeq::new();
        let Some(starts) = self.parts[ONSET].successors(None) else {
            return result;
        };

        let weighted: SmallVec<[(Node, f64); 16]> =
            starts.iter().map(|&(t, c)| (t, f64::from(c))).collect();
        let mut next = weighted_choice(rng, &weighted).flatten();

        let mut current_part = ONSET;
        let mut repeats: AHashMap<Phoneme, u32> = AHashMap::new();

        while let Some(phoneme) = next {
            result.push(phoneme);

            let Some(owner) = (current_part..PART_COUNT)
                .find(|&i| self.parts[i].contains(phoneme))
            else {
                break;
            };
            if owner != current_part {
                current_part = owner;
                repeats.clear();
            }
            *repeats.entry(phoneme).or_insert(0) += 1;

            let Some(successors) = self.parts[current_part].successors(Some(phoneme)) else {
                break;
            };
            let weighted: SmallVec<[(Node, f64); 16]> = successors
                .iter()
                .filter(|(target, _)| match target {
                    Some(p) => repeats.get(p).copied().unwrap_or(0) < MAX_PART_REPEATS,
                    None => true,
                })
                .map(|&(t, c)| (t, f64::from(c)))
                .collect();
            next = weighted_choice(rng, &weighted).flatten();
        }

        result
    }

    /// Generate a random syllable constrained to a palette of phonemes
    /// (typically the original word's own phonemes).
    ///
    /// Edges are filtered to destinations still present in the palette with
    /// counts above `options.min_support`. Returns `None` when no legal
    /// continuation exists at any step, or when the result is shorter than
    /// two phonemes.
    pub fn random_syllable_from_palette(
        &self,
        rng: &mut StdRng,
        palette: &[Phoneme],
        options: &PaletteOptions,
    ) -> Option<PhonemeSeq> {
        let mut remaining: SmallVec<[Phoneme; 16]> = palette.iter().copied().collect();
        let mut result = PhonemeSeq::new();
        let mut current_part = ONSET;
        let mut repeats: AHashMap<Phoneme, u32> = AHashMap::new();

        let starts = self.parts[ONSET].successors(None)?;
        let mut next = {
            let weighted = Self::palette_weights(starts, &remaining, &repeats, options);
            if weighted.is_empty() {
                return None;
            }
            weighted_choice(rng, &weighted).flatten()
        };

        while let Some(phoneme) = next {
            result.push(phoneme);
            if options.use_once {
                if let Some(index) = remaining.iter().position(|&p| p == phoneme) {
                    remaining.remove(index);
                }
            }

            let Some(owner) = (current_part..PART_COUNT)
                .find(|&i| self.parts[i].contains(phoneme))
            else {
                break;
            };
            if owner != current_part {
                current_part = owner;
                repeats.clear();
            }
            *repeats.entry(phoneme).or_insert(0) += 1;

            let Some(successors) = self.parts[current_part].successors(Some(phoneme)) else {
                break;
            };
            let weighted = Self::palette_weights(successors, &remaining, &repeats, options);
            if weighted.is_empty() {
                return None;
            }
            next = weighted_choice(rng, &weighted).flatten();
        }

        if result.len() < 2 {
            return None;
        }
        Some(result)
    }

    /// Filter and weight edges for a palette walk. The end marker always
    /// stays legal; phoneme targets must sit in the remaining palette with
    /// enough support, and may be decayed by palette position.
    fn palette_weights(
        successors: &[(Node, u32)],
        remaining: &[Phoneme],
        repeats: &AHashMap<Phoneme, u32>,
        options: &PaletteOptions,
    ) -> SmallVec<[(Node, f64); 16]> {
        successors
            .iter()
            .filter_map(|&(target, count)| match target {
                None => Some((None, f64::from(count))),
                Some(p) => {
                    if count <= options.min_support
                        || repeats.get(&p).copied().unwrap_or(0) >= MAX_PART_REPEATS
                    {
                        return None;
                    }
                    let index = remaining.iter().position(|&q| q == p)?;
                    let mut weight = f64::from(count);
                    if options.force_order {
                        weight *= (1.0 - options.order_decay).powi(index as i32);
                    }
                    Some((Some(p), weight))
                }
            })
            .collect()
    }

    /// Count stored for the transition `from → to` in a part, if any.
    pub fn transition_count(&self, part: usize, from: Node, to: Node) -> Option<u32> {
        self.parts[part]
            .successors(from)?
            .iter()
            .find(|(target, _)| *target == to)
            .map(|&(_, count)| count)
    }

    /// Render the graph in Graphviz DOT form for the external visualizer.
    pub fn to_dot(&self) -> String {
        let labels = ["onset", "vowel", "coda"];
        let node_name = |node: Node, at_or_after: usize| -> String {
            match node {
                None => "end".to_string(),
                Some(p) => {
                    let prefix = if at_or_after == ONSET && self.parts[ONSET].contains(p) {
                        "onset"
                    } else if at_or_after <= NUCLEUS && self.parts[NUCLEUS].contains(p) {
                        "vowel"
                    } else {
                        "coda"
                    };
                    format!("\"{prefix}_{p}\"")
                }
            }
        };

        let mut edges = Vec::new();
        if let Some(starts) = self.parts[ONSET].successors(None) {
            for &(target, _) in starts {
                edges.push(format!("st -> {};", node_name(target, ONSET)));
            }
        }
        for (index, part) in self.parts.iter().enumerate() {
            let mut keys: Vec<_> = part.iter().collect();
            keys.sort_by_key(|(node, _)| node.map(|p| p.as_str()));
            for (node, successors) in keys {
                let Some(phoneme) = node else { continue };
                for &(target, _) in successors {
                    edges.push(format!(
                        "{} -> {};",
                        node_name(Some(*phoneme), index),
                        node_name(target, index)
                    ));
                }
            }
        }

        let mut clusters = String::new();
        for (index, part) in self.parts.iter().enumerate() {
            let mut names: Vec<_> = part
                .iter()
                .filter_map(|(node, _)| node.map(|p| p.as_str()))
                .collect();
            names.sort_unstable();
            let nodes: String = names
                .iter()
                .map(|name| format!("\"{}_{name}\" [label=\"{name}\"];\n", labels[index]))
                .collect();
            clusters.push_str(&format!(
                "subgraph cluster_{index} {{\n    color = \"blue\";\n    label = \"{}\";\n{nodes}}}\n",
                labels[index]
            ));
        }

        format!(
            "digraph \"Sonority\" {{\n  rankdir=LR;\n  graph [fontsize=10 fontname=\"Verdana\" compound=true];\n  node [shape=record fontsize=10 fontname=\"Verdana\"];\n\n  st [label=\"Start\"];\n  end [label=\"End\"];\n\n  {}\n\n{clusters}}}\n",
            edges.join("\n  ")
        )
    }

    /// Convert to the stable serialized form (three named tables, keys
    /// sorted).
    pub fn to_persisted(&self) -> PersistedGraph {
        let persist_part = |part: &GraphPart| -> PersistedPart {
            let mut entries: PersistedPart = part
                .iter()
                .map(|(node, successors)| {
                    (
                        node.map(|p| p.as_str().to_string()),
                        successors
                            .iter()
                            .map(|&(t, c)| (t.map(|p| p.as_str().to_string()), c))
                            .collect(),
                    )
                })
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            entries
        };
        PersistedGraph {
            onset: persist_part(&self.parts[ONSET]),
            vowel: persist_part(&self.parts[NUCLEUS]),
            coda: persist_part(&self.parts[CODA]),
        }
    }

    /// Rebuild a graph from its serialized form.
    pub fn from_persisted(persisted: &PersistedGraph) -> Self {
        let load_part = |entries: &PersistedPart| -> GraphPart {
            let mut part = GraphPart::default();
            for (key, successors) in entries {
                let from = key.as_deref().map(Phoneme::new);
                part.edges.insert(
                    from,
                    successors
                        .iter()
                        .map(|(t, c)| (t.as_deref().map(Phoneme::new), *c))
                        .collect(),
                );
            }
            part
        };
        Self {
            parts: [
                load_part(&persisted.onset),
                load_part(&persisted.vowel),
                load_part(&persisted.coda),
            ],
        }
    }
}

/// One serialized sub-graph: (phoneme-or-null, successor list) pairs.
pub type PersistedPart = Vec<(Option<String>, Vec<(Option<String>, u32)>)>;

/// Serialized graph form: three named tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedGraph {
    /// Onset transitions, start marker keyed as null.
    pub onset: PersistedPart,
    /// Nucleus transitions.
    pub vowel: PersistedPart,
    /// Coda transitions, end marker as null target.
    pub coda: PersistedPart,
}

/// Weighted random choice via cumulative sum and linear scan.
///
/// Returns `None` for an empty or zero-weight option list.
fn weighted_choice<T: Copy>(rng: &mut StdRng, options: &[(T, f64)]) -> Option<T> {
    let total: f64 = options.iter().map(|(_, w)| w).sum();
    if options.is_empty() || total <= 0.0 {
        return None;
    }
    let roll = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for &(value, weight) in options {
        cumulative += weight;
        if cumulative > roll {
            return Some(value);
        }
    }
    options.last().map(|&(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::phonology::phoneme::{joined, seq_from_symbols, Phoneme};
    use crate::phonology::syllable::{Corpus, Syllable};

    fn corpus_of(words: &[(&str, &[&str])]) -> Corpus {
        let mut corpus = Corpus::new();
        for (word, symbols) in words {
            corpus.push(*word, vec![Syllable::new(seq_from_symbols(symbols))]);
        }
        corpus
    }

    fn small_corpus() -> Corpus {
        corpus_of(&[
            ("cat", &["c", "a", "t"]),
            ("hat", &["h", "a", "t"]),
            ("at", &["a", "t"]),
        ])
    }

    #[test]
    fn test_start_edges_from_small_corpus() {
        let graph = SonorityGraph::build(&small_corpus());
        let c = Phoneme::new("c");
        let h = Phoneme::new("h");
        let a = Phoneme::new("a");

        assert_eq!(graph.transition_count(ONSET, None, Some(c)), Some(1));
        assert_eq!(graph.transition_count(ONSET, None, Some(h)), Some(1));
        // "at" has no onset; the start marker points into the nucleus.
        assert_eq!(graph.transition_count(ONSET, None, Some(a)), Some(1));
    }

    #[test]
    fn test_repeated_pairs_increment_counts() {
        let graph = SonorityGraph::build(&small_corpus());
        let a = Phoneme::new("a");
        let t = Phoneme::new("t");
        // a → t observed in all three words.
        assert_eq!(graph.transition_count(NUCLEUS, Some(a), Some(t)), Some(3));
        // t → end in the coda, also three times.
        assert_eq!(graph.transition_count(CODA, Some(t), None), Some(3));
    }

    #[test]
    fn test_generation_stays_inside_learned_onsets() {
        let graph = SonorityGraph::build(&small_corpus());
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let syllable = graph.random_syllable(&mut rng);
            if let Some(first) = syllable.first() {
                assert!(
                    ["c", "h", "a"].contains(&first.as_str()),
                    "unexpected first phoneme {first}"
                );
            }
        }
    }

    #[test]
    fn test_generation_is_reproducible_with_seed() {
        let graph = SonorityGraph::build(&small_corpus());
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                joined(&graph.random_syllable(&mut rng_a)),
                joined(&graph.random_syllable(&mut rng_b))
            );
        }
    }

    #[test]
    fn test_repeat_cap_in_one_part() {
        // Onset chains s → s freely in the data; generation must still cap
        // at two per part.
        let corpus = corpus_of(&[
            ("sssa", &["s", "s", "s", "a"]),
            ("ssa", &["s", "s", "a"]),
            ("sa", &["s", "a"]),
        ]);
        let graph = SonorityGraph::build(&corpus);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..300 {
            let syllable = graph.random_syllable(&mut rng);
            let s_count = syllable.iter().filter(|p| p.as_str() == "s").count();
            assert!(s_count <= 2, "got {}", joined(&syllable));
        }
    }

    #[test]
    fn test_palette_generation_respects_palette() {
        let corpus = corpus_of(&[
            ("bun", &["b", "u", "n"]),
            ("bund", &["b", "u", "n", "d"]),
            ("but", &["b", "u", "t"]),
            ("nut", &["n", "u", "t"]),
        ]);
        let graph = SonorityGraph::build(&corpus);
        let palette = seq_from_symbols(&["b", "u", "n", "d"]);
        let options = PaletteOptions {
            min_support: 0,
            ..PaletteOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut produced = 0;
        for _ in 0..100 {
            if let Some(syllable) =
                graph.random_syllable_from_palette(&mut rng, &palette, &options)
            {
                produced += 1;
                assert!(syllable.len() >= 2);
                for phoneme in &syllable {
                    assert!(palette.contains(phoneme), "{phoneme} not in palette");
                }
            }
        }
        assert!(produced > 0, "palette generation never succeeded");
    }

    #[test]
    fn test_palette_generation_fails_on_disjoint_palette() {
        let graph = SonorityGraph::build(&small_corpus());
        let palette = seq_from_symbols(&["z", "ʒ"]);
        let options = PaletteOptions {
            min_support: 0,
            ..PaletteOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            assert!(graph
                .random_syllable_from_palette(&mut rng, &palette, &options)
                .is_none());
        }
    }

    #[test]
    fn test_use_once_prevents_reuse() {
        let corpus = corpus_of(&[
            ("tat", &["t", "a", "t"]),
            ("tata", &["t", "a"]),
        ]);
        let graph = SonorityGraph::build(&corpus);
        let palette = seq_from_symbols(&["t", "a"]);
        let options = PaletteOptions {
            use_once: true,
            min_support: 0,
            ..PaletteOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            if let Some(syllable) =
                graph.random_syllable_from_palette(&mut rng, &palette, &options)
            {
                let t_count = syllable.iter().filter(|p| p.as_str() == "t").count();
                assert!(t_count <= 1, "t reused: {}", joined(&syllable));
            }
        }
    }

    #[test]
    fn test_persisted_round_trip() {
        let graph = SonorityGraph::build(&small_corpus());
        let persisted = graph.to_persisted();
        let restored = SonorityGraph::from_persisted(&persisted);

        let a = Phoneme::new("a");
        let t = Phoneme::new("t");
        assert_eq!(
            restored.transition_count(NUCLEUS, Some(a), Some(t)),
            graph.transition_count(NUCLEUS, Some(a), Some(t))
        );
        assert_eq!(restored.parts[ONSET].len(), graph.parts[ONSET].len());
    }

    #[test]
    fn test_dot_render_mentions_all_parts() {
        let graph = SonorityGraph::build(&small_corpus());
        let dot = graph.to_dot();
        assert!(dot.contains("digraph \"Sonority\""));
        assert!(dot.contains("cluster_0"));
        assert!(dot.contains("st ->"));
        assert!(dot.contains("end"));
    }
}
