//! Txforge CLI - synthetic transaction data generator
//!
//! Thin boundary around the generation pipeline: reads metadata bytes from
//! a file (single document or container), runs the pipeline, and prints a
//! summary of the produced archive.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use txforge_common::logging::{init_logging, LogConfig, LogLevel};
use txforge_gen::pipeline::{GenerationPipeline, PipelineConfig};
use txforge_gen::schema::extract_schema;

#[derive(Parser, Debug)]
#[command(name = "txforge")]
#[command(author, version, about = "Synthetic transaction data generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Generate synthetic records from a metadata file and archive them
    Generate {
        /// Metadata document (.json) or container (.zip, .tar.gz)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of records per table per document
        #[arg(short, long)]
        count: usize,

        /// Root directory for generated record files
        #[arg(long, env = "TXFORGE_OUTPUT_DIR", default_value = "data")]
        output_dir: PathBuf,

        /// Directory the archive is written to
        #[arg(long, env = "TXFORGE_DOWNLOADS_DIR", default_value = "downloads")]
        downloads_dir: PathBuf,

        /// Archive file name
        #[arg(long, default_value = "generated_data.zip")]
        archive_name: String,

        /// Fixed RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the canonical schema extracted from a metadata document
    Schema {
        /// Metadata document (.json)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("txforge".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    match cli.command {
        Command::Generate {
            input,
            count,
            output_dir,
            downloads_dir,
            archive_name,
            seed,
        } => generate(&input, count, output_dir, downloads_dir, archive_name, seed),
        Command::Schema { input } => schema(&input),
    }
}

/// Run the generation pipeline over one input file
fn generate(
    input: &std::path::Path,
    count: usize,
    output_dir: PathBuf,
    downloads_dir: PathBuf,
    archive_name: String,
    seed: Option<u64>,
) -> Result<()> {
    let bytes = std::fs::read(input)?;
    let source_name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string());

    info!(input = %input.display(), count, "Starting generation");

    let config = PipelineConfig {
        output_root: output_dir,
        downloads_dir,
        archive_name,
        seed,
    };
    let mut pipeline = GenerationPipeline::new(config);
    let report = pipeline.run(&source_name, &bytes, count)?;

    for document in &report.documents {
        match &document.outcome {
            Ok(paths) => println!("  {} -> {} file(s)", document.source, paths.len()),
            Err(reason) => println!("  {} -> skipped: {}", document.source, reason),
        }
    }
    println!("Generated {} file(s)", report.file_count);
    println!("Archive: {}", report.archive_path.display());
    println!("SHA-256: {}", report.archive_sha256);

    Ok(())
}

/// Extract and print the canonical schema of one document
fn schema(input: &std::path::Path) -> Result<()> {
    let bytes = std::fs::read(input)?;
    let doc: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| txforge_common::TxforgeError::invalid_format(e.to_string()))?;

    let extracted = extract_schema(&doc);
    println!("{}", serde_json::to_string_pretty(&extracted.schema)?);

    Ok(())
}
