//! Serial captioning of every image under a directory.
//!
//! Images are processed one at a time in sorted path order. A failing image is
//! logged and skipped; the run only fails when nothing succeeds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::captioner::Captioner;
use crate::clients::ModelServer;
use crate::error::{CaptionError, Result};
use crate::models::Caption;

/// Lowercase extensions treated as images.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// One successfully captioned image, as written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub image_path: String,
    pub caption: Caption,
}

#[derive(Debug)]
pub struct BatchFailure {
    pub image_path: PathBuf,
    pub error: CaptionError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.entries.len() + self.failures.len()
    }
}

#[derive(Debug)]
pub enum BatchOutcome {
    /// The directory held no images; nothing was written.
    NoImages,
    /// Every image failed; nothing was written.
    AllFailed(BatchReport),
    /// At least one caption was written to the output file.
    Completed(BatchReport),
}

/// Progress notifications for callers that report to a terminal.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Started {
        index: usize,
        total: usize,
        path: &'a Path,
    },
    Succeeded {
        path: &'a Path,
    },
    Failed {
        path: &'a Path,
        error: &'a CaptionError,
    },
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Every image file below `dir`, recursively, deduplicated and sorted.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|source| CaptionError::FileAccess {
            path: current.clone(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| CaptionError::FileAccess {
                path: current.clone(),
                source,
            })?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|source| CaptionError::FileAccess {
                path: path.clone(),
                source,
            })?;
            if file_type.is_dir() {
                pending.push(path);
            } else if is_image(&path) && path.is_file() {
                found.insert(path);
            }
        }
    }

    Ok(found.into_iter().collect())
}

/// Caption each image in order, collecting successes and failures.
pub fn caption_images<S, F>(captioner: &Captioner<S>, images: &[PathBuf], mut progress: F) -> BatchReport
where
    S: ModelServer,
    F: FnMut(BatchEvent<'_>),
{
    let mut report = BatchReport::default();
    let total = images.len();

    for (i, path) in images.iter().enumerate() {
        progress(BatchEvent::Started {
            index: i + 1,
            total,
            path,
        });
        match captioner.generate_caption(path) {
            Ok(caption) => {
                info!("Captioned {} ({}/{})", path.display(), i + 1, total);
                progress(BatchEvent::Succeeded { path });
                report.entries.push(BatchEntry {
                    image_path: path.to_string_lossy().into_owned(),
                    caption,
                });
            }
            Err(error) => {
                warn!("Failed to caption {}: {}", path.display(), error);
                progress(BatchEvent::Failed {
                    path,
                    error: &error,
                });
                report.failures.push(BatchFailure {
                    image_path: path.clone(),
                    error,
                });
            }
        }
    }

    report
}

/// Write entries as a pretty JSON array, creating parent directories.
pub fn write_results(output_file: &Path, entries: &[BatchEntry]) -> Result<()> {
    let to_output_err = |source| CaptionError::Output {
        path: output_file.to_path_buf(),
        source,
    };

    if let Some(parent) = output_file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(to_output_err)?;
    }

    let mut writer = BufWriter::new(File::create(output_file).map_err(to_output_err)?);
    serde_json::to_writer_pretty(&mut writer, entries)
        .map_err(|e| to_output_err(e.into()))?;
    writer.flush().map_err(to_output_err)?;
    Ok(())
}

/// Caption every image under `input_dir` and write successes to `output_file`.
pub fn process_directory<S, F>(
    captioner: &Captioner<S>,
    input_dir: &Path,
    output_file: &Path,
    progress: F,
) -> Result<BatchOutcome>
where
    S: ModelServer,
    F: FnMut(BatchEvent<'_>),
{
    let images = collect_images(input_dir)?;
    if images.is_empty() {
        info!("No images found in {}", input_dir.display());
        return Ok(BatchOutcome::NoImages);
    }
    info!("Found {} images in {}", images.len(), input_dir.display());

    let report = caption_images(captioner, &images, progress);
    if report.entries.is_empty() {
        return Ok(BatchOutcome::AllFailed(report));
    }

    write_results(output_file, &report.entries)?;
    info!(
        "Wrote {} captions to {} ({} failed)",
        report.entries.len(),
        output_file.display(),
        report.failures.len()
    );
    Ok(BatchOutcome::Completed(report))
}
