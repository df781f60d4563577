//! SMC Processor Library
//!
//! A Rust library for converting SMC V1/V2 strong-motion recordings into
//! single-column text, tri-component BBP and ten-column HER files.
//!
//! This library provides tools for:
//! - Splitting multi-channel SMC files and extracting fixed-layout headers
//! - Decoding fixed-width numeric blocks, repairing run-on negative values
//! - Normalizing channel orientations to N/E/Z components
//! - Writing the downstream exchange formats atomically
//! - Reading converted files back for comparison against a signal toolkit

pub mod assembler;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod models;
pub mod orientation;
pub mod parser;
pub mod processor;
pub mod readback;
pub mod station_names;
pub mod toolkit;
pub mod writer;

// Re-export commonly used types
pub use config::ConverterConfig;
pub use error::{Result, SmcError};
pub use models::{
    ChannelMetadata, CombinedRecord, Component, FormatVersion, Orientation, Record, SeriesKind,
    Station, StationRecords,
};
pub use parser::{load_station, parse_station};
pub use processor::BatchProcessor;
pub use writer::{write_station, OutputFormat};
