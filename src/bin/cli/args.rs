//! CLI argument structures.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Monosyllabic English pipeline
#[derive(Parser)]
#[command(name = "monosyl")]
#[command(version = VERSION)]
#[command(about = "Assign every English word a one-syllable phonetic form")]
#[command(long_about = "
Batch pipeline that maps a frequency-ordered English dictionary onto unique
one-syllable phonetic forms, keeping morphological relatives (jump/jumping)
phonetically related.

Common Usage:

  # Full pipeline with default input/output paths
  monosyl run

  # Reproducible run with homonym reuse enabled
  monosyl run --seed 42 --enable homonyms

  # Inspect how a transcription splits into syllables
  monosyl syllabify bɪznɪs --reference busi-ness

  # Respell phonetic forms
  monosyl respell tʃip mɑrk

  # Export the sonority graph for the visualizer
  monosyl graph-dot --out graph.dot
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: load, syllabify, generate, assign, write
    Run(RunArgs),

    /// Split a flat transcription into syllables against a reference
    Syllabify(SyllabifyArgs),

    /// Generate random syllables from the sonority graph
    Generate(GenerateArgs),

    /// Export the sonority graph in Graphviz DOT form
    #[command(name = "graph-dot")]
    GraphDot(GraphDotArgs),

    /// Respell phonetic forms into approximate Latin orthography
    Respell(RespellArgs),

    /// Print the default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,
}

/// Arguments for the full pipeline run.
#[derive(Args)]
pub struct RunArgs {
    /// Configuration file (YAML); defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Feature flags to enable (currently: homonyms)
    #[arg(long = "enable", value_name = "FEATURE")]
    pub enable: Vec<String>,

    /// Seed the random source for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the bulk generation attempt count
    #[arg(long)]
    pub attempts: Option<u64>,
}

/// Arguments for the syllabify inspection command.
#[derive(Args)]
pub struct SyllabifyArgs {
    /// Flat phonetic transcription (may include stress marks)
    pub ipa: String,

    /// Hyphenated reference spelling fixing the syllable count
    #[arg(long)]
    pub reference: String,

    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the generate inspection command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How many syllables to print
    #[arg(long, default_value_t = 10)]
    pub count: usize,

    /// Restrict generation to these phonemes (a palette string)
    #[arg(long)]
    pub palette: Option<String>,

    /// Seed the random source
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the graph-dot command.
#[derive(Args)]
pub struct GraphDotArgs {
    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output path; defaults to the configured graph rendering path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the respell command.
#[derive(Args)]
pub struct RespellArgs {
    /// Phonetic forms to respell
    #[arg(required = true)]
    pub forms: Vec<String>,
}
