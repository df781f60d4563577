//! Configuration management and validation.
//!
//! Provides the conversion settings shared by the CLI and the batch
//! processor: where outputs go, which formats to emit, and how many files
//! to convert at once.

use crate::error::{Result, SmcError};
use crate::writer::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Settings for one conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Directory receiving every output file
    pub output_dir: PathBuf,

    /// Formats to emit for each station
    pub formats: Vec<OutputFormat>,

    /// Maximum concurrent file processing
    pub max_concurrent_files: usize,

    /// Expand facility abbreviations in station names
    pub expand_station_names: bool,

    /// Draw a progress bar while converting
    pub show_progress: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            formats: OutputFormat::ALL.to_vec(),
            max_concurrent_files: num_cpus::get(),
            expand_station_names: false,
            show_progress: true,
        }
    }
}

impl ConverterConfig {
    /// Set the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Replace the requested formats, dropping repeats
    pub fn with_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        let mut unique = Vec::with_capacity(formats.len());
        for format in formats {
            if !unique.contains(&format) {
                unique.push(format);
            }
        }
        self.formats = unique;
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    /// Enable station-name abbreviation expansion
    pub fn with_expanded_station_names(mut self) -> Self {
        self.expand_station_names = true;
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check the settings before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_files == 0 {
            return Err(SmcError::Configuration {
                message: "max_concurrent_files must be at least 1".to_string(),
            });
        }
        if self.formats.is_empty() {
            return Err(SmcError::Configuration {
                message: "at least one output format is required".to_string(),
            });
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(SmcError::Configuration {
                message: format!("{} is not a directory", self.output_dir.display()),
            });
        }

        debug!(
            "Configuration valid: formats={:?}, jobs={}, output={}",
            self.formats,
            self.max_concurrent_files,
            self.output_dir.display()
        );
        Ok(())
    }
}
