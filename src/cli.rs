//! Command-line interface components.

use crate::config::ConverterConfig;
use crate::writer::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "smc_processor")]
#[command(about = "Convert SMC V1/V2 strong-motion recordings to text, BBP and HER formats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// SMC files, directories to search recursively, or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Output directory (created if missing)
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Output formats to write
    #[arg(
        short,
        long = "format",
        value_enum,
        value_delimiter = ',',
        default_values_t = OutputFormat::ALL
    )]
    pub formats: Vec<OutputFormat>,

    /// Number of files converted concurrently (defaults to the CPU count)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Expand facility abbreviations in station names
    #[arg(long)]
    pub expand_names: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log level selected by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Build the converter configuration
    pub fn to_config(&self) -> ConverterConfig {
        let mut config = ConverterConfig::default()
            .with_output_dir(&self.output_dir)
            .with_formats(self.formats.clone());

        if let Some(jobs) = self.jobs {
            config = config.with_max_concurrent_files(jobs);
        }
        if self.expand_names {
            config = config.with_expanded_station_names();
        }
        if self.no_progress || self.quiet {
            config = config.without_progress();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["smc_processor", "data/"]).unwrap();

        assert_eq!(args.inputs, vec!["data/"]);
        assert_eq!(args.formats, OutputFormat::ALL.to_vec());
        assert_eq!(args.get_log_level(), "info");

        let config = args.to_config();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.show_progress);
        assert!(!config.expand_station_names);
    }

    #[test]
    fn test_format_list() {
        let args =
            Args::try_parse_from(["smc_processor", "-f", "her,text", "a.V2", "b.V2"]).unwrap();
        assert_eq!(args.formats, vec![OutputFormat::Her, OutputFormat::Text]);
        assert_eq!(args.inputs.len(), 2);
    }

    #[test]
    fn test_full_options() {
        let args = Args::try_parse_from([
            "smc_processor",
            "-o",
            "out",
            "-j",
            "3",
            "--expand-names",
            "--no-progress",
            "-v",
            "*.V1",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "debug");
        let config = args.to_config();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_concurrent_files, 3);
        assert!(config.expand_station_names);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Args::try_parse_from(["smc_processor"]).is_err());
        assert!(Args::try_parse_from(["smc_processor", "-f", "csv", "a.V2"]).is_err());
        assert!(Args::try_parse_from(["smc_processor", "-v", "-q", "a.V2"]).is_err());
    }

    #[test]
    fn test_quiet_disables_progress() {
        let args = Args::try_parse_from(["smc_processor", "-q", "a.V2"]).unwrap();
        assert_eq!(args.get_log_level(), "warn");
        assert!(!args.to_config().show_progress);
    }
}
