//! End-to-end pipeline tests over a miniature dictionary.

use std::path::Path;

use monosyl_rs::core::config::{MonosylConfig, PronunciationFormat};
use monosyl_rs::core::pipeline::MonosylPipeline;
use monosyl_rs::io::reports::OutputTable;
use monosyl_rs::AssignMethod;
use tempfile::TempDir;

const FREQUENCIES: &str = "\
the\t23135851162
business\t100000
cat\t90000
jump\t80000
jumping\t70000
market\t60000
cheap\t50000
";

const CMU_DICT: &str = "\
# miniature cmudict-syl excerpt
THE  DH AH0
BUSINESS  B IH1 Z . N IH0 S
CAT  K AE1 T
JUMP  JH AH1 M P
JUMPING  JH AH1 M . P IH0 NG
MARKET  M AA1 R . K IH0 T
CHEAP  CH IY1 P
CHEAP(2)  CH IY1 P S
";

async fn configured(dir: &Path) -> MonosylConfig {
    tokio::fs::write(dir.join("word_frequency.txt"), FREQUENCIES)
        .await
        .unwrap();
    tokio::fs::write(dir.join("cmudict.txt"), CMU_DICT)
        .await
        .unwrap();

    let mut config = MonosylConfig::default();
    config.generation.attempts = 3000;
    config.generation.seed = Some(1234);
    config.io.word_frequency_list = dir.join("word_frequency.txt");
    config.io.pronunciation_list = dir.join("cmudict.txt");
    config.io.pronunciation_format = PronunciationFormat::CmuSyllabified;
    config.io.syllabized_cache = dir.join("out/syllabized.json");
    config.io.graph_cache = dir.join("out/graph.bin");
    config.io.pool_cache = dir.join("out/pool.json");
    config.io.graph_dot = dir.join("out/graph.dot");
    config.io.output = dir.join("out/monosyllabic.json");
    config.io.duplicates = dir.join("out/duplicates.json");
    config.io.summary = dir.join("out/summary.json");
    config
}

async fn read_output(config: &MonosylConfig) -> OutputTable {
    let bytes = tokio::fs::read(&config.io.output).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_full_pipeline_assigns_every_word() {
    let dir = TempDir::new().unwrap();
    let config = configured(dir.path()).await;
    let pipeline = MonosylPipeline::new(config.clone());

    let summary = pipeline.run().await.unwrap();
    assert_eq!(summary.total_words, 7);
    // Every word is counted exactly once across the method tallies.
    assert_eq!(
        summary.method_counts.values().sum::<usize>(),
        summary.total_words
    );

    let table = read_output(&config).await;
    assert_eq!(table.len(), 7);
    for (word, record) in &table {
        assert_eq!(word, &word.to_lowercase());
        assert!(!record.mono.is_empty(), "{word} got an empty form");
        assert!(!record.respelled.is_empty());
    }
}

#[tokio::test]
async fn test_monosyllabic_words_keep_their_pronunciation() {
    let dir = TempDir::new().unwrap();
    let config = configured(dir.path()).await;
    MonosylPipeline::new(config.clone()).run().await.unwrap();

    let table = read_output(&config).await;
    let cat = &table["cat"];
    assert_eq!(cat.mono, "kæt");
    assert_eq!(cat.num_syllables, 1);
    assert_eq!(cat.method, AssignMethod::AlreadyOneSyllable);

    let cheap = &table["cheap"];
    assert_eq!(cheap.mono, "tʃip");
    assert_eq!(cheap.respelled, "cheep");
}

#[tokio::test]
async fn test_multi_syllable_words_are_shortened_uniquely() {
    let dir = TempDir::new().unwrap();
    let config = configured(dir.path()).await;
    MonosylPipeline::new(config.clone()).run().await.unwrap();

    let table = read_output(&config).await;
    let mut assigned_forms = Vec::new();
    for record in table.values() {
        if record.num_syllables > 1 && record.method != AssignMethod::Failed {
            assigned_forms.push(record.mono.clone());
        }
    }
    let total = assigned_forms.len();
    assigned_forms.sort();
    assigned_forms.dedup();
    assert_eq!(assigned_forms.len(), total, "assigned forms must be unique");

    // The duplicate report exists and is consistent with uniqueness.
    let duplicates: Vec<serde_json::Value> =
        serde_json::from_slice(&tokio::fs::read(&config.io.duplicates).await.unwrap()).unwrap();
    assert!(duplicates.is_empty());
}

#[tokio::test]
async fn test_second_run_reuses_caches_and_reproduces_output() {
    let dir = TempDir::new().unwrap();
    let config = configured(dir.path()).await;

    MonosylPipeline::new(config.clone()).run().await.unwrap();
    let first = tokio::fs::read(&config.io.output).await.unwrap();

    // Caches (graph, pool, corpus) now exist; a second run must load them
    // and, with the same seed, reproduce the table byte-for-byte.
    MonosylPipeline::new(config.clone()).run().await.unwrap();
    let second = tokio::fs::read(&config.io.output).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_inputs_abort_before_compute() {
    let dir = TempDir::new().unwrap();
    let mut config = configured(dir.path()).await;
    config.io.word_frequency_list = dir.path().join("does_not_exist.txt");

    let result = MonosylPipeline::new(config.clone()).run().await;
    assert!(result.is_err());
    assert!(!config.io.output.exists());
}

#[tokio::test]
async fn test_graph_dot_written_for_visualizer() {
    let dir = TempDir::new().unwrap();
    let config = configured(dir.path()).await;
    MonosylPipeline::new(config.clone()).run().await.unwrap();

    let dot = tokio::fs::read_to_string(&config.io.graph_dot).await.unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("cluster_0"));
}
