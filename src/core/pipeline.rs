//! The batch pipeline orchestrator.
//!
//! Wires the stages end to end: load the dictionary, syllabify, build the
//! sonority graph, generate the candidate pool, run the assignment engine,
//! respell, and write the outputs. Every expensive artifact is cached and
//! reloaded on later runs. Computation is synchronous and single-threaded;
//! only the file I/O at stage boundaries is asynchronous.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::assign::engine::{AssignmentEngine, AssignmentOutcome};
use crate::core::config::MonosylConfig;
use crate::core::errors::Result;
use crate::graph::generate::{build_candidate_pool, CandidatePool};
use crate::graph::sonority::SonorityGraph;
use crate::io::dictionary;
use crate::io::persistence;
use crate::io::reports;
use crate::phonology::syllable::Corpus;

/// Summary of one pipeline run, persisted next to the output table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run started.
    pub timestamp: DateTime<Utc>,
    /// Total wall time in seconds.
    pub duration_seconds: f64,
    /// Words processed.
    pub total_words: usize,
    /// Words that were already one syllable.
    pub already_monosyllabic: usize,
    /// Words that exhausted every strategy.
    pub failed: usize,
    /// Total syllables removed from the language.
    pub syllables_eliminated: usize,
    /// Assignment counts per method tag.
    pub method_counts: std::collections::BTreeMap<String, usize>,
    /// Rolling success rate over multi-syllable words.
    pub rolling_success: Vec<f64>,
    /// Number of phonetic-form collisions recorded.
    pub duplicates: usize,
    /// Candidates left in the pool at the end.
    pub pool_remaining: usize,
}

/// The end-to-end monosyllabic pipeline.
pub struct MonosylPipeline {
    config: MonosylConfig,
}

impl MonosylPipeline {
    /// Create a pipeline over a configuration.
    pub fn new(config: MonosylConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &MonosylConfig {
        &self.config
    }

    /// Run the full pipeline and write all outputs.
    pub async fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;
        let run_id = Uuid::new_v4();
        let timestamp = Utc::now();
        let started = Instant::now();
        info!(%run_id, "starting monosyllabic pipeline");

        let corpus = self.load_corpus().await?;
        let graph = self.load_or_build_graph(&corpus).await?;
        self.write_graph_dot(&graph).await;
        let pool = self.load_or_build_pool(&graph).await?;
        info!(
            words = corpus.len(),
            candidates = pool.len(),
            "inputs ready; assigning"
        );

        let engine = AssignmentEngine::new(&self.config, &graph, &corpus);
        let outcome = engine.assign_all(pool);

        let summary = self
            .write_outputs(&outcome, run_id, timestamp, started)
            .await?;
        info!(
            total = summary.total_words,
            failed = summary.failed,
            eliminated = summary.syllables_eliminated,
            "pipeline complete"
        );
        Ok(summary)
    }

    /// Load the syllabified corpus, preferring the cache.
    pub async fn load_corpus(&self) -> Result<Corpus> {
        let io = &self.config.io;
        if let Some(corpus) = persistence::load_corpus_cache(&io.syllabized_cache).await? {
            return Ok(corpus);
        }
        let corpus =
            dictionary::load_corpus(io, &self.config.generation, &self.config.partition).await?;
        persistence::save_corpus_cache(&io.syllabized_cache, &corpus).await?;
        Ok(corpus)
    }

    /// Load the sonority graph cache or build it from the corpus.
    pub async fn load_or_build_graph(&self, corpus: &Corpus) -> Result<SonorityGraph> {
        let path = &self.config.io.graph_cache;
        if let Some(graph) = persistence::load_graph(path).await? {
            return Ok(graph);
        }
        info!("building sonority graph from corpus");
        let graph = SonorityGraph::build(corpus);
        persistence::save_graph(path, &graph).await?;
        Ok(graph)
    }

    /// Load the candidate pool cache or generate it from the graph.
    pub async fn load_or_build_pool(&self, graph: &SonorityGraph) -> Result<CandidatePool> {
        let path = &self.config.io.pool_cache;
        if let Some(pool) = persistence::load_pool(path).await? {
            return Ok(pool);
        }
        info!(
            attempts = self.config.generation.attempts,
            "generating candidate syllables"
        );
        let seed = self.config.generation.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let pool = build_candidate_pool(
            graph,
            self.config.generation.attempts,
            self.config.scoring.min_transition_support,
            &mut rng,
            true,
        );
        persistence::save_pool(path, &pool).await?;
        Ok(pool)
    }

    /// Write the Graphviz rendering for the external visualizer. Best
    /// effort: a failure here never aborts the run.
    async fn write_graph_dot(&self, graph: &SonorityGraph) {
        let path = &self.config.io.graph_dot;
        if let Err(error) = persistence::write_bytes(path, graph.to_dot().as_bytes()).await {
            warn!(%error, path = %path.display(), "could not write graph rendering");
        }
    }

    /// Respell, write the output table, the duplicate report, and the
    /// summary.
    async fn write_outputs(
        &self,
        outcome: &AssignmentOutcome,
        run_id: Uuid,
        timestamp: DateTime<Utc>,
        started: Instant,
    ) -> Result<RunSummary> {
        let io = &self.config.io;
        let table = reports::build_output_table(&outcome.records);
        reports::write_output_table(&io.output, &table).await?;
        reports::write_duplicates(&io.duplicates, &outcome.duplicates).await?;

        let stats = &outcome.stats;
        let summary = RunSummary {
            run_id,
            timestamp,
            duration_seconds: started.elapsed().as_secs_f64(),
            total_words: stats.total_words,
            already_monosyllabic: stats.already_monosyllabic,
            failed: stats.failed,
            syllables_eliminated: stats.syllables_eliminated,
            method_counts: stats.method_counts.clone(),
            rolling_success: stats.rolling_success.clone(),
            duplicates: outcome.duplicates.len(),
            pool_remaining: stats.pool_remaining,
        };
        persistence::write_json(&io.summary, &summary).await?;
        Ok(summary)
    }
}
