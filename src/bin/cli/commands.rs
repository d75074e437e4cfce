//! CLI command implementations.

use anyhow::Context;
use console::style;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use monosyl_rs::core::config::MonosylConfig;
use monosyl_rs::core::pipeline::{MonosylPipeline, RunSummary};
use monosyl_rs::graph::sonority::PaletteOptions;
use monosyl_rs::io::persistence;
use monosyl_rs::phonology::partition::PartitionScorer;
use monosyl_rs::phonology::phoneme::joined;
use monosyl_rs::phonology::segmentation::{segment, segment_with_markers};
use monosyl_rs::respell::respell;

use super::args::{GenerateArgs, GraphDotArgs, RespellArgs, RunArgs, SyllabifyArgs};

/// Load the configuration file, or fall back to defaults.
fn load_configuration(path: Option<PathBuf>) -> anyhow::Result<MonosylConfig> {
    match path {
        Some(path) => MonosylConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(MonosylConfig::default()),
    }
}

/// Run the full pipeline.
pub async fn run_command(args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_configuration(args.config)?;
    for feature in &args.enable {
        config.features.enable(feature)?;
    }
    if args.seed.is_some() {
        config.generation.seed = args.seed;
    }
    if let Some(attempts) = args.attempts {
        config.generation.attempts = attempts;
    }

    let pipeline = MonosylPipeline::new(config);
    let summary = pipeline.run().await?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", style("Monosyllabic assignment complete").green().bold());
    println!("  words:       {}", summary.total_words);
    println!("  one-syllable already: {}", summary.already_monosyllabic);
    println!(
        "  syllables eliminated: {}",
        style(summary.syllables_eliminated).cyan()
    );
    if summary.failed > 0 {
        println!("  failed:      {}", style(summary.failed).red());
    }
    if summary.duplicates > 0 {
        println!("  duplicates:  {}", style(summary.duplicates).yellow());
    }
    println!("  methods:");
    for (method, count) in &summary.method_counts {
        println!("    {method:<22} {count}");
    }
    println!("  took {:.1}s", summary.duration_seconds);
}

/// Split a transcription against a hyphenated reference spelling.
pub fn syllabify_command(args: SyllabifyArgs) -> anyhow::Result<()> {
    let config = load_configuration(args.config)?;
    let (phonemes, markers) = segment_with_markers(&args.ipa);
    let reference: Vec<String> = args
        .reference
        .split('-')
        .map(str::to_lowercase)
        .collect();

    let scorer = PartitionScorer::new(&config.partition);
    match scorer.best_partition(&phonemes, &markers, &reference) {
        Some(syllables) => {
            let rendered: Vec<String> = syllables.iter().map(|s| s.joined()).collect();
            println!("{}", rendered.join("|"));
            Ok(())
        }
        None => anyhow::bail!(
            "cannot split {} phonemes into {} syllables",
            phonemes.len(),
            reference.len()
        ),
    }
}

/// Print random syllables from the cached (or freshly built) graph.
pub async fn generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = load_configuration(args.config)?;
    if args.seed.is_some() {
        config.generation.seed = args.seed;
    }
    let pipeline = MonosylPipeline::new(config);
    let corpus = pipeline.load_corpus().await?;
    let graph = pipeline.load_or_build_graph(&corpus).await?;

    let seed = pipeline
        .config()
        .generation
        .seed
        .unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let palette = args.palette.as_deref().map(segment);
    for _ in 0..args.count {
        match &palette {
            Some(palette) => {
                let options = PaletteOptions {
                    min_support: pipeline.config().scoring.min_transition_support,
                    order_decay: pipeline.config().scoring.palette_order_decay,
                    ..PaletteOptions::default()
                };
                match graph.random_syllable_from_palette(&mut rng, palette, &options) {
                    Some(syllable) => println!("{}", joined(&syllable)),
                    None => println!("{}", style("(no legal syllable)").dim()),
                }
            }
            None => println!("{}", joined(&graph.random_syllable(&mut rng))),
        }
    }
    Ok(())
}

/// Export the sonority graph as Graphviz DOT.
pub async fn graph_dot_command(args: GraphDotArgs) -> anyhow::Result<()> {
    let config = load_configuration(args.config)?;
    let out = args.out.unwrap_or_else(|| config.io.graph_dot.clone());

    let pipeline = MonosylPipeline::new(config);
    let corpus = pipeline.load_corpus().await?;
    let graph = pipeline.load_or_build_graph(&corpus).await?;
    persistence::write_bytes(&out, graph.to_dot().as_bytes()).await?;
    println!("wrote {}", out.display());
    Ok(())
}

/// Respell phonetic forms.
pub fn respell_command(args: RespellArgs) {
    for form in &args.forms {
        println!("{form} => {}", respell(form));
    }
}

/// Print the default configuration as YAML.
pub fn print_default_config() -> anyhow::Result<()> {
    let config = MonosylConfig::default();
    print!("{}", config.to_yaml_string()?);
    Ok(())
}
