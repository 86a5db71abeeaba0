//! Symptom CLI - run the extraction pipeline locally
//!
//! Usage:
//!   sym extract "I have a fever and headache"
//!   sym extract --engine keyword "chest pain when climbing stairs"
//!   sym map fever cough

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sym_core::{normalize_form, AppConfig, EngineKind, Symptom};
use sym_extractor::{SpecializationMapper, SymptomPipeline};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sym")]
#[command(about = "Symptom extraction CLI")]
#[command(version)]
struct Cli {
    /// Specialization mapping file (TOML)
    #[arg(long, global = true)]
    mapping: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract symptoms and specializations from free text
    Extract {
        /// Engine to use (stub, keyword, model)
        #[arg(long)]
        engine: Option<EngineKind>,

        /// Upstream inference endpoint for the model engine
        #[arg(long)]
        model_url: Option<String>,

        /// Upstream timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Symptom description
        text: String,
    },
    /// Rank specializations for a list of symptom names
    Map {
        /// Symptom names, e.g. "chest pain"
        #[arg(required = true)]
        symptoms: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.mapping {
        config.extraction.mapping_file = Some(path);
    }

    match cli.command {
        Commands::Extract {
            engine,
            model_url,
            timeout_ms,
            text,
        } => {
            if let Some(engine) = engine {
                config.extraction.engine = engine;
            }
            if model_url.is_some() {
                config.extraction.model_url = model_url;
            }
            if let Some(timeout_ms) = timeout_ms {
                config.extraction.model_timeout_ms = timeout_ms;
            }
            config.validate()?;

            let pipeline = SymptomPipeline::from_config(&config.extraction)?;
            let result = pipeline.analyze(&text).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Map { symptoms } => {
            let mapper = match &config.extraction.mapping_file {
                Some(path) => SpecializationMapper::from_file(path)?,
                None => SpecializationMapper::new(),
            };

            let symptoms: Vec<Symptom> = symptoms
                .iter()
                .filter(|s| !normalize_form(s).is_empty())
                .map(Symptom::new)
                .collect();

            let ranked = mapper.map(&symptoms);
            if ranked.is_empty() {
                println!("No specializations matched");
            }
            for rec in ranked {
                println!("{}. {} (score {})", rec.rank, rec.name, rec.score);
            }
        }
    }

    Ok(())
}
