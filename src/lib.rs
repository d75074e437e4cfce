//! # Monosyl-RS: Monosyllabic English Pipeline
//!
//! A batch pipeline that assigns every multi-syllable English word a synthetic
//! one-syllable phonetic form while keeping the result recognizable and
//! pronounceable. The library provides:
//!
//! - **Phoneme Segmentation**: greedy longest-match IPA tokenization
//! - **Syllable Boundary Assignment**: scored partition search over flat
//!   transcriptions
//! - **Sonority Graph**: a learned phonotactic model supporting weighted-random
//!   and palette-constrained syllable generation
//! - **Variant Generation**: phonetically plausible morphological variants
//!   (plural, past, gerund, ...) kept related to their base word
//! - **Assignment Engine**: multi-pass greedy assignment with uniqueness
//!   tracking and layered fallback strategies
//! - **Respelling**: deterministic transliteration into approximate Latin
//!   orthography
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         CLI Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Core Engine  │  Phonology   │   Graph     │  I/O & Storage │
//! │               │              │             │                │
//! │ • Pipeline    │ • Segmenter  │ • Sonority  │ • Dictionary   │
//! │ • Config      │ • Partition  │ • Generate  │ • Persistence  │
//! │ • Errors      │ • Syllables  │             │ • Reports      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use monosyl_rs::{MonosylConfig, MonosylPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonosylConfig::default();
//!     let pipeline = MonosylPipeline::new(config);
//!     let summary = pipeline.run().await?;
//!     println!("assigned {} words", summary.total_words);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Core pipeline modules
pub mod core {
    //! Configuration, errors, and the batch pipeline orchestrator.

    pub mod config;
    pub mod errors;
    pub mod pipeline;
}

// Phoneme-level processing
pub mod phonology {
    //! Phoneme inventory, segmentation, syllables, and partition search.

    pub mod inventory;
    pub mod partition;
    pub mod phoneme;
    pub mod segmentation;
    pub mod syllable;
}

// The learned phonotactic model
pub mod graph {
    //! Sonority graph construction and random syllable generation.

    pub mod generate;
    pub mod sonority;
}

// Monosyllabic assignment
pub mod assign {
    //! The multi-pass assignment engine and variant generation.

    pub mod engine;
    pub mod session;
    pub mod variants;
}

// Phonetic-to-Latin respelling
pub mod respell;

// I/O, persistence, and reporting
pub mod io {
    //! Dictionary loading, artifact caching, and result output.

    pub mod dictionary;
    pub mod persistence;
    pub mod reports;
}

// Re-export primary types for convenience
pub use crate::assign::engine::{AssignMethod, AssignmentEngine, AssignmentOutcome};
pub use crate::core::config::MonosylConfig;
pub use crate::core::errors::{MonosylError, Result};
pub use crate::core::pipeline::{MonosylPipeline, RunSummary};
pub use crate::graph::sonority::SonorityGraph;
pub use crate::phonology::phoneme::{Phoneme, PhonemeSeq};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
