//! Batch conversion engine.
//!
//! Orchestrates the complete workflow: input discovery, concurrent
//! per-file conversion on blocking worker threads, and a coloured summary.
//! Every file is independent; a failure is logged and counted, never fatal
//! for the batch.

use crate::config::ConverterConfig;
use crate::constants::INPUT_EXTENSIONS;
use crate::error::{Result, SmcError};
use crate::models::{ProcessingStats, Station};
use crate::parser::load_station;
use crate::station_names::expand_station_names;
use crate::writer::{write_atomically, OutputFormat, RenderedFile};

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tokio::task;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Result of converting one input file
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub station: String,
    pub records: usize,
    pub outputs: Vec<PathBuf>,
    /// Requested formats whose emitter rejected the station
    pub rejected: Vec<OutputFormat>,
}

/// Converts batches of SMC files
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    inputs: Vec<String>,
    config: ConverterConfig,
}

impl BatchProcessor {
    /// Create a processor for files, directories or glob patterns
    pub fn new(inputs: Vec<String>) -> Self {
        Self {
            inputs,
            config: ConverterConfig::default(),
        }
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        self.config.validate()?;

        println!("{}", "Starting SMC conversion".bright_green().bold());
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.config.output_dir.display()
        );

        // Step 1: Discover input files
        let files = discover_inputs(&self.inputs)?;
        if files.is_empty() {
            return Err(SmcError::Configuration {
                message: format!("no SMC files found in {}", self.inputs.join(", ")),
            });
        }
        println!(
            "  {} {} input file(s)",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold()
        );

        // Step 2: Create output directory
        fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| SmcError::file_access(&self.config.output_dir, e))?;

        // Step 3: Convert files concurrently
        let stats = self.process_files(&files).await;

        let total_time = start_time.elapsed().as_millis();
        print_summary(&stats, total_time);

        Ok(ProcessingStats {
            processing_time_ms: total_time,
            ..stats
        })
    }

    async fn process_files(&self, files: &[PathBuf]) -> ProcessingStats {
        let pb = if self.config.show_progress {
            let pb = ProgressBar::new(files.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            ) {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message("Converting files");

        let concurrent_limit = self.config.max_concurrent_files.min(files.len()).max(1);
        let config = Arc::new(self.config.clone());
        debug!(
            "Converting {} files with concurrency {}",
            files.len(),
            concurrent_limit
        );

        let initial = ProcessingStats {
            output_path: self.config.output_dir.clone(),
            ..ProcessingStats::default()
        };

        let stats = stream::iter(files.iter().cloned())
            .map(|path| {
                let config = Arc::clone(&config);
                let pb = pb.clone();
                async move {
                    if let Some(file_name) = path.file_name() {
                        pb.set_message(format!("Converting: {}", file_name.to_string_lossy()));
                    }

                    let worker_path = path.clone();
                    let result = task::spawn_blocking(move || convert_file(&worker_path, &config))
                        .await
                        .unwrap_or_else(|e| {
                            Err(SmcError::ProcessingFailed {
                                path: path.clone(),
                                reason: format!("worker task failed: {}", e),
                            })
                        });
                    pb.inc(1);

                    match result {
                        Ok(outcome) => {
                            debug!(
                                "Converted {} ({} outputs)",
                                path.display(),
                                outcome.outputs.len()
                            );
                            Ok(outcome)
                        }
                        Err(e) => {
                            error!("Failed to convert {}: {:#}", path.display(), e);
                            Err(e)
                        }
                    }
                }
            })
            .buffer_unordered(concurrent_limit)
            .fold(initial, |mut stats, result| async move {
                match result {
                    Ok(outcome) => {
                        stats.files_processed += 1;
                        stats.records_loaded += outcome.records;
                        stats.outputs_written += outcome.outputs.len();
                        stats.formats_rejected += outcome.rejected.len();
                    }
                    Err(_) => stats.files_failed += 1,
                }
                stats
            })
            .await;

        pb.finish_with_message("All SMC files converted");
        stats
    }
}

/// Load one file and write every requested format its version supports.
///
/// Each format is rendered in full before any of its files are written.
/// A format whose emitter rejects the station is logged and skipped; the
/// file only fails when no requested format could be rendered.
pub fn convert_file(path: &Path, config: &ConverterConfig) -> Result<FileOutcome> {
    let mut station = load_station(path)?;
    if config.expand_station_names {
        station = expand_station_names(station);
    }

    let RenderedFormats {
        files,
        rejected,
        first_error,
    } = render_requested(&station, config);

    if let Some(e) = first_error {
        if files.is_empty() {
            return Err(e);
        }
    }

    let outputs = files
        .iter()
        .map(|file| write_atomically(&config.output_dir, &file.file_name, &file.contents))
        .collect::<Result<Vec<_>>>()?;

    Ok(FileOutcome {
        station: station.label(),
        records: station.records.len(),
        outputs,
        rejected,
    })
}

struct RenderedFormats {
    files: Vec<RenderedFile>,
    rejected: Vec<OutputFormat>,
    first_error: Option<SmcError>,
}

fn render_requested(station: &Station, config: &ConverterConfig) -> RenderedFormats {
    let mut rendered = RenderedFormats {
        files: Vec::new(),
        rejected: Vec::new(),
        first_error: None,
    };

    for format in &config.formats {
        if !format.supports(station.version) {
            info!(
                "Skipping {} output for {} station {}",
                format,
                station.version,
                station.label()
            );
            continue;
        }
        match format.render(station) {
            Ok(files) => rendered.files.extend(files),
            Err(e) => {
                warn!("No {} output for {}: {}", format, station.label(), e);
                rendered.rejected.push(*format);
                rendered.first_error.get_or_insert(e);
            }
        }
    }
    rendered
}

/// Expand files, directories and glob patterns into a sorted list of inputs.
///
/// Directories are searched recursively for `.V1`/`.V2` files (any case).
/// Explicit file paths are kept even when missing, so the failure is
/// reported against that file.
pub fn discover_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for input in inputs {
        let path = Path::new(input);

        if path.is_dir() {
            let before = files.len();
            for entry in WalkDir::new(path).follow_links(true) {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_smc_file(entry.path()) => {
                        files.insert(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Skipping unreadable entry under {}: {}", input, e),
                }
            }
            debug!("Found {} SMC files under {}", files.len() - before, input);
        } else if is_glob_pattern(input) {
            let matches = glob::glob(input).map_err(|e| SmcError::Configuration {
                message: format!("invalid glob pattern '{}': {}", input, e),
            })?;
            for entry in matches {
                match entry {
                    Ok(path) if path.is_file() => {
                        files.insert(path);
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Skipping unreadable match for {}: {}", input, e),
                }
            }
        } else {
            files.insert(path.to_path_buf());
        }
    }

    Ok(files.into_iter().collect())
}

fn is_smc_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| INPUT_EXTENSIONS.contains(&ext.as_str()))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn print_summary(stats: &ProcessingStats, total_time: u128) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        total_time.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Records loaded:".bright_cyan(),
        stats.records_loaded.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Outputs written:".bright_cyan(),
        stats.outputs_written.to_string().bright_white().bold()
    );
    if stats.formats_rejected > 0 {
        println!(
            "  {} {}",
            "Formats rejected:".bright_yellow(),
            stats.formats_rejected.to_string().bright_yellow()
        );
    }
}
