use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use product_captions::config::{Config, DEFAULT_LOG_LEVEL};
use product_captions::render::{caption_json, render_caption};
use product_captions::{Captioner, choose_model};

#[derive(Parser, Debug)]
#[command(
    name = "product-captions",
    version,
    about = "Caption e-commerce product images with a local vision model"
)]
struct Cli {
    /// Model server URL (defaults to the configured host)
    #[arg(long, global = true)]
    host: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List models installed on the model server
    Models,
    /// Caption a single product image
    Caption {
        /// Image file, or `-` to read the image from stdin
        image: String,
        /// Model to use (defaults to the configured model when installed)
        #[arg(long)]
        model: Option<String>,
        /// Also print the caption as JSON
        #[arg(long)]
        raw: bool,
        /// Write the caption JSON to this file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log = product_captions::init_tracing(DEFAULT_LOG_LEVEL);
    let mut config = Config::load().context("Failed to load configuration")?;
    log.set(&config.log_level);
    if let Some(host) = cli.host {
        config.host = host;
        config.validate()?;
    }

    let mut captioner = Captioner::from_config(&config)?;

    match cli.command {
        Commands::Models => {
            let models = captioner.list_models();
            if models.is_empty() {
                bail!(unreachable_message(&config));
            }
            for model in models {
                println!("{model}");
            }
            Ok(())
        }
        Commands::Caption {
            image,
            model,
            raw,
            export,
        } => {
            let models = captioner.list_models();
            if models.is_empty() {
                bail!(unreachable_message(&config));
            }

            let selected = match model {
                Some(requested) => {
                    if !models.contains(&requested) {
                        warn!("Model {} is not listed by the server", requested);
                    }
                    requested
                }
                None => choose_model(&models, &config.model)
                    .context("Model server listed no models")?,
            };
            info!("Using model {}", selected);
            captioner.set_model(selected);

            // Stdin images are spooled to a temp file that is removed on drop.
            let upload;
            let image_path: &Path = if image == "-" {
                upload = spool_stdin()?;
                upload.path()
            } else {
                Path::new(&image)
            };

            let caption = captioner
                .generate_caption(image_path)
                .context("Error generating caption")?;

            print!("{}", render_caption(&caption));
            let json = caption_json(&caption);
            if raw {
                println!("\n== Raw JSON ==\n{json}");
            }
            if let Some(path) = export {
                std::fs::write(&path, &json)
                    .with_context(|| format!("Failed to export caption to {}", path.display()))?;
                println!("\nCaption data saved to {}", path.display());
            }
            Ok(())
        }
    }
}

fn unreachable_message(config: &Config) -> String {
    format!(
        "Could not connect to the model service at {}. Please ensure Ollama is running.",
        config.host
    )
}

fn spool_stdin() -> Result<tempfile::NamedTempFile> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .context("Failed to read image from stdin")?;
    let mut file = tempfile::NamedTempFile::new().context("Failed to create temporary file")?;
    file.write_all(&bytes)
        .context("Failed to write temporary image")?;
    Ok(file)
}
