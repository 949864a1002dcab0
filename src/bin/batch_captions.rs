//! Batch captioning of a directory of product images.
//!
//! Scans the input directory recursively, captions each image in sorted order
//! and writes the successes to a JSON file.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

use product_captions::Captioner;
use product_captions::batch::{BatchEvent, BatchOutcome, process_directory};
use product_captions::config::{Config, DEFAULT_LOG_LEVEL};

#[derive(Parser, Debug)]
#[command(
    name = "batch_captions",
    about = "Batch process images for e-commerce product captioning"
)]
struct Cli {
    /// Directory containing input images
    input_dir: PathBuf,
    /// Output JSON file path
    output_file: PathBuf,
    /// Ollama API host URL
    #[arg(long)]
    host: Option<String>,
    /// Model to use for captioning
    #[arg(long)]
    model: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log = product_captions::init_tracing(DEFAULT_LOG_LEVEL);
    let mut config = Config::load().context("Failed to load configuration")?;
    log.set(&config.log_level);
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    config.validate()?;

    let input_dir = std::path::absolute(&cli.input_dir)
        .with_context(|| format!("Invalid input path {}", cli.input_dir.display()))?;
    let output_file = std::path::absolute(&cli.output_file)
        .with_context(|| format!("Invalid output path {}", cli.output_file.display()))?;

    if !input_dir.is_dir() {
        bail!("Input directory '{}' does not exist", input_dir.display());
    }

    let captioner = Captioner::from_config(&config)?;

    println!("Using model: {}", captioner.model());
    println!("Processing images from: {}", input_dir.display());
    println!("Results will be saved to: {}", output_file.display());

    let outcome = process_directory(&captioner, &input_dir, &output_file, |event| match event {
        BatchEvent::Started { index, total, path } => {
            if index == 1 {
                println!("\nFound {} images to process", total);
            }
            println!("\nProcessing image {}/{}: {}", index, total, path.display());
        }
        BatchEvent::Succeeded { path } => {
            println!("✓ Successfully processed {}", path.display());
        }
        BatchEvent::Failed { path, error } => {
            eprintln!("✗ Error processing {}: {}", path.display(), error);
        }
    })?;

    match outcome {
        BatchOutcome::NoImages => {
            println!("No image files found in {}", input_dir.display());
            Ok(())
        }
        BatchOutcome::AllFailed(report) => {
            bail!(
                "No images were successfully processed ({} failed)",
                report.failures.len()
            );
        }
        BatchOutcome::Completed(report) => {
            println!(
                "\nSuccessfully processed {} of {} images",
                report.entries.len(),
                report.total()
            );
            if !report.failures.is_empty() {
                println!("Failed to process {} images", report.failures.len());
            }
            println!("Results saved to: {}", output_file.display());
            Ok(())
        }
    }
}
