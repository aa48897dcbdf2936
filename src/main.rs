mod group;
mod launcher;
mod logging;
mod metadata;
mod report;
mod tool;
mod workflow;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use launcher::{DirectLauncher, JsonLauncher};
use metadata::Metadata;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sumflow")]
#[command(about = "Two-stage fan-in pipeline demo - increment inputs, then cumulatively sum")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress normal output
    #[arg(long, global = true)]
    quiet: bool,

    /// Also write logs to a timestamped file
    #[arg(long, global = true)]
    log_to_file: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in smoke test (both launcher variants)
    Demo,

    /// Run the pipeline from JSON configuration documents
    Run {
        /// Pipeline configuration document
        #[arg(long)]
        config: PathBuf,

        /// Input metadata document
        #[arg(long)]
        metadata: PathBuf,

        /// Where to write the results document
        #[arg(long, default_value = "/tmp/results.json")]
        results: PathBuf,
    },

    /// Parse and shape-check JSON configuration without running
    Validate {
        /// Pipeline configuration document
        #[arg(long)]
        config: PathBuf,

        /// Input metadata document
        #[arg(long)]
        metadata: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = if cli.log_to_file {
        Some(logging::default_log_path("sumflow")?)
    } else {
        None
    };
    logging::init_logging(cli.debug, cli.quiet, log_file)?;

    match cli.command {
        Commands::Demo => run_demo()?,

        Commands::Run {
            config,
            metadata,
            results,
        } => {
            JsonLauncher.launch(&config, &metadata, &results)?;
            println!("results written to {}", results.display());
        }

        Commands::Validate { config, metadata } => {
            match launcher::load_documents(&config, &metadata)
                .map_err(|e| e.to_string())
                .and_then(|(files, mds, _)| {
                    workflow::validate_shape(&files, &mds)
                        .map(|(_, paths, _)| paths.len())
                        .map_err(|e| e.to_string())
                }) {
                Ok(count) => {
                    println!("✓ Configuration is valid");
                    println!("  {} input files", count);
                }
                Err(e) => {
                    eprintln!("✗ Configuration validation failed:\n{}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Smoke test mirroring both launcher variants over three sample inputs
fn run_demo() -> Result<()> {
    let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
    let dir = std::env::temp_dir()
        .join("sumflow")
        .join(format!("demo-{}", timestamp));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating demo directory {}", dir.display()))?;

    tracing::info!(dir = %dir.display(), "1. create sample data: 3 input files");
    let mut paths = Vec::new();
    for (name, value) in [("file1", "5"), ("file2", "9"), ("file3", "13")] {
        let path = dir.join(name);
        std::fs::write(&path, value).with_context(|| format!("writing {}", path.display()))?;
        paths.push(path);
    }

    let input_files = group::file_group("number", paths.clone());
    let input_metadata = group::metadata_group(
        "number",
        vec![
            Metadata::new("Number", "plainText"),
            Metadata::new("Number", "plainText"),
            Metadata::new("Number", "plainText"),
        ],
    );
    let output_files = group::file_group("output", vec![dir.join("outputFile{}")]);

    tracing::info!("2. run the direct-argument variant");
    let (out_files, _) = DirectLauncher.launch(&input_files, &input_metadata, &output_files)?;
    for path in out_files.get("output").map(Vec::as_slice).unwrap_or(&[]) {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        println!("  {} -> {}", path.display(), contents.trim());
    }

    tracing::info!("3. run the JSON-configured variant");
    let (config_path, metadata_path) = write_demo_documents(&dir, &paths)?;
    let results_path = dir.join("results.json");
    JsonLauncher.launch(&config_path, &metadata_path, &results_path)?;
    println!("results written to {}", results_path.display());

    Ok(())
}

/// Generate the two JSON documents the JSON launcher consumes
fn write_demo_documents(
    dir: &std::path::Path,
    inputs: &[PathBuf],
) -> Result<(PathBuf, PathBuf)> {
    let config = launcher::PipelineConfig {
        input_files: inputs
            .iter()
            .map(|path| launcher::InputBinding {
                name: "number".into(),
                value: path.clone(),
            })
            .collect(),
        output_files: vec![launcher::OutputBinding {
            name: "output".into(),
            file_path: dir.join("json-outputFile{}"),
        }],
        arguments: serde_json::Map::new(),
    };

    let entries: Vec<launcher::MetadataEntry> = inputs
        .iter()
        .map(|path| launcher::MetadataEntry {
            name: "number".into(),
            file_path: path.clone(),
            data_type: "Number".into(),
            file_type: "plainText".into(),
        })
        .collect();

    let config_path = dir.join("config.json");
    let metadata_path = dir.join("input_metadata.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)
        .with_context(|| format!("writing {}", config_path.display()))?;
    std::fs::write(&metadata_path, serde_json::to_string_pretty(&entries)?)
        .with_context(|| format!("writing {}", metadata_path.display()))?;

    Ok((config_path, metadata_path))
}
