//! Error types for the conversion crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting granules.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Not an HDF5 granule: {0}")]
    NotAGranule(PathBuf),

    #[error("No subdatasets found in {0}")]
    NoSubdatasets(PathBuf),

    #[error("Subdataset index {requested} out of range ({available} available)")]
    SubdatasetIndex { requested: usize, available: usize },

    #[error("Missing required metadata key: {0}")]
    MissingMetadata(String),

    #[error("Invalid metadata value for '{key}': {value}")]
    InvalidMetadata { key: String, value: String },

    #[error("Cannot derive an output name from {0}")]
    InvalidOutputName(PathBuf),

    #[error("Failed to scan input directory: {0}")]
    DirectoryScan(String),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;
