//! Artifact caching between runs.
//!
//! The sonority graph and the candidate pool are expensive to build and
//! cheap to serialize; the syllabified corpus likewise. Each artifact has a
//! load function returning `Ok(None)` when no cache exists, and a save
//! function that creates parent directories as needed. The graph cache is
//! binary; the corpus and pool caches are JSON so the external UI tooling
//! can read them too.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::errors::{MonosylError, Result};
use crate::graph::generate::{CandidatePool, PersistedPool};
use crate::graph::sonority::{PersistedGraph, SonorityGraph};
use crate::phonology::syllable::Corpus;

/// Read and deserialize a JSON file. `Ok(None)` when the file is absent.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let value = serde_json::from_slice(&bytes)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(MonosylError::io(
            format!("Failed to read {}", path.display()),
            e,
        )),
    }
}

/// Serialize a value as pretty JSON and write it, creating parent
/// directories.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_bytes(path, &bytes).await
}

/// Write raw bytes, creating parent directories.
pub async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            MonosylError::io(format!("Failed to create {}", parent.display()), e)
        })?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| MonosylError::io(format!("Failed to write {}", path.display()), e))
}

/// Load a cached sonority graph, if one exists.
pub async fn load_graph(path: &Path) -> Result<Option<SonorityGraph>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let persisted: PersistedGraph = bincode::deserialize(&bytes)?;
            info!(path = %path.display(), "loaded cached sonority graph");
            Ok(Some(SonorityGraph::from_persisted(&persisted)))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no graph cache");
            Ok(None)
        }
        Err(e) => Err(MonosylError::io(
            format!("Failed to read graph cache {}", path.display()),
            e,
        )),
    }
}

/// Save the sonority graph cache.
pub async fn save_graph(path: &Path, graph: &SonorityGraph) -> Result<()> {
    let bytes = bincode::serialize(&graph.to_persisted())?;
    write_bytes(path, &bytes).await
}

/// Load a cached candidate pool, if one exists.
pub async fn load_pool(path: &Path) -> Result<Option<CandidatePool>> {
    let Some(entries) = read_json::<PersistedPool>(path).await? else {
        debug!(path = %path.display(), "no candidate pool cache");
        return Ok(None);
    };
    info!(path = %path.display(), "loaded cached candidate pool");
    Ok(Some(CandidatePool::from_persisted(entries)))
}

/// Save the candidate pool cache.
pub async fn save_pool(path: &Path, pool: &CandidatePool) -> Result<()> {
    write_json(path, &pool.to_persisted()).await
}

/// Load the cached syllabified corpus, if one exists.
pub async fn load_corpus_cache(path: &Path) -> Result<Option<Corpus>> {
    let corpus = read_json::<Corpus>(path).await?;
    if corpus.is_some() {
        info!(path = %path.display(), "loaded cached syllabified corpus");
    }
    Ok(corpus)
}

/// Save the syllabified corpus cache.
pub async fn save_corpus_cache(path: &Path, corpus: &Corpus) -> Result<()> {
    write_json(path, corpus).await
}
