//! Error types for ncflatten.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Malformed datasets surface as precondition errors and fail the whole
//! conversion call; unsupported variable shapes are not errors at all and are
//! returned as data by the faceted flattener.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ncflatten operations.
pub type Result<T> = std::result::Result<T, NcflattenError>;

/// Errors that can occur in ncflatten.
#[derive(Debug, Error)]
pub enum NcflattenError {
    /// A variable references a dimension the dataset does not declare.
    #[error("Variable '{variable}' references undeclared dimension '{dimension}'")]
    UndeclaredDimension { variable: String, dimension: String },

    /// A variable's array rank differs from its signature length.
    #[error("Variable '{variable}' has rank {rank} but declares {expected} dimensions")]
    RankMismatch {
        variable: String,
        rank: usize,
        expected: usize,
    },

    /// A variable's array shape differs from the lengths of its dimensions.
    #[error("Variable '{variable}' has shape {shape:?} but its dimensions have lengths {expected:?}")]
    ShapeMismatch {
        variable: String,
        shape: Vec<usize>,
        expected: Vec<usize>,
    },

    /// A dimension with dependent variables has no coordinate values.
    #[error("Dimension '{dimension}' has no coordinate values but variable '{variable}' depends on it")]
    EmptyCoordinates { dimension: String, variable: String },

    /// The primary dimension requested for flattening does not exist.
    #[error("Primary dimension '{0}' is not declared by the dataset")]
    MissingPrimaryDimension(String),

    /// A variable name does not exist in the dataset.
    #[error("Variable '{0}' does not exist in the dataset")]
    UnknownVariable(String),

    /// A dimension was declared twice.
    #[error("Dimension '{0}' is declared more than once")]
    DuplicateDimension(String),

    /// A variable name was used twice.
    #[error("Variable '{0}' is declared more than once")]
    DuplicateVariable(String),

    /// An input file does not exist.
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Two inputs would write to the same output files.
    #[error("Output {} is also written by {}", .base.display(), .other.display())]
    OutputConflict { base: PathBuf, other: PathBuf },

    /// Failed to read NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// Failed to write a Parquet file.
    #[error("Parquet error: {0}")]
    Parquet(String),

    /// Failed to serialize metadata.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NcflattenError {
    /// Create an UndeclaredDimension error.
    pub fn undeclared_dimension(variable: impl Into<String>, dimension: impl Into<String>) -> Self {
        Self::UndeclaredDimension {
            variable: variable.into(),
            dimension: dimension.into(),
        }
    }

    /// Whether this error reports a malformed dataset rather than an I/O fault.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::UndeclaredDimension { .. }
                | Self::RankMismatch { .. }
                | Self::ShapeMismatch { .. }
                | Self::EmptyCoordinates { .. }
                | Self::MissingPrimaryDimension(_)
                | Self::UnknownVariable(_)
                | Self::DuplicateDimension(_)
                | Self::DuplicateVariable(_)
        )
    }
}

impl From<netcdf::Error> for NcflattenError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}

impl From<arrow2::error::Error> for NcflattenError {
    fn from(err: arrow2::error::Error) -> Self {
        Self::Parquet(err.to_string())
    }
}
