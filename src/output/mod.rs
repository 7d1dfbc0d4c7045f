//! Writing converted tables and metadata to disk.
//!
//! The engine names each table with an output key; this module appends the
//! format's extension and writes the file.

mod csv;
mod metadata;
mod parquet;

pub use self::csv::{write_csv, write_table};
pub use self::metadata::{dump_metadata, Entry, Metadata};
pub use self::parquet::write_parquet;

use crate::config::ConvertConfig;
use crate::data::{load_dataset, Dataset, ReadIssue};
use crate::engine::{combine, flatten, partition_with, LabelCollision, Rejection, Table};
use crate::error::{NcflattenError, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Tabular file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated values.
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl Format {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Parquet => "parquet",
        }
    }

    /// Write a table in this format.
    pub fn write(self, table: &Table, path: &Path) -> Result<()> {
        match self {
            Format::Csv => write_csv(table, path),
            Format::Parquet => write_parquet(table, path),
        }
    }
}

/// How tables are cut from a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One table over every dimension.
    Combined,
    /// One table per dimension signature.
    Collection,
    /// One table over the primary dimension.
    Faceted,
}

/// Conversion method: a mode paired with a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// One CSV indexed by every dimension.
    #[value(name = "to_csv")]
    ToCsv,
    /// One CSV per dimension signature.
    #[value(name = "to_csv_collection")]
    ToCsvCollection,
    /// One CSV indexed by the primary dimension.
    #[value(name = "to_faceted_csv")]
    ToFacetedCsv,
    /// One Parquet file indexed by every dimension.
    #[value(name = "to_parquet")]
    ToParquet,
    /// One Parquet file per dimension signature.
    #[value(name = "to_parquet_collection")]
    ToParquetCollection,
    /// One Parquet file indexed by the primary dimension.
    #[value(name = "to_faceted_parquet")]
    ToFacetedParquet,
}

impl Method {
    /// The partitioning mode.
    pub fn mode(self) -> Mode {
        match self {
            Method::ToCsv | Method::ToParquet => Mode::Combined,
            Method::ToCsvCollection | Method::ToParquetCollection => Mode::Collection,
            Method::ToFacetedCsv | Method::ToFacetedParquet => Mode::Faceted,
        }
    }

    /// The output format.
    pub fn format(self) -> Format {
        match self {
            Method::ToCsv | Method::ToCsvCollection | Method::ToFacetedCsv => Format::Csv,
            Method::ToParquet | Method::ToParquetCollection | Method::ToFacetedParquet => {
                Format::Parquet
            },
        }
    }
}

/// Files written by one conversion, and what was left out.
#[derive(Debug, Clone, Default)]
pub struct ConvertReport {
    /// Data files in the order they were written.
    pub data_files: Vec<PathBuf>,
    /// Metadata file, when enabled.
    pub metadata_file: Option<PathBuf>,
    /// Variables excluded in faceted mode.
    pub rejected: Vec<Rejection>,
    /// Duplicate column names in faceted mode.
    pub collisions: Vec<LabelCollision>,
    /// Variables the reader left out or rounded.
    pub read_issues: Vec<ReadIssue>,
}

/// Append `.{extension}` to an output key.
pub fn with_extension(key: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", key, extension))
}

/// Convert a dataset, writing every output under the key `base`.
pub fn convert(
    dataset: &Dataset,
    base: &Path,
    method: Method,
    config: &ConvertConfig,
) -> Result<ConvertReport> {
    let base = base.to_string_lossy();
    let format = method.format();
    let mut report = ConvertReport::default();

    if let Some(parent) = Path::new(base.as_ref()).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tables: Vec<(String, Table)> = match method.mode() {
        Mode::Combined => vec![(base.to_string(), combine(dataset)?)],
        Mode::Collection => partition_with(dataset, &base, config.scalar_key)?,
        Mode::Faceted => {
            let flat = flatten(dataset, &config.primary_dimension)?;
            report.rejected = flat.rejected;
            report.collisions = flat.collisions;
            vec![(base.to_string(), flat.table)]
        },
    };

    for (key, table) in &tables {
        let path = with_extension(key, format.extension());
        format.write(table, &path)?;
        tracing::info!(path = %path.display(), rows = table.row_count(), "wrote table");
        report.data_files.push(path);
    }

    if config.metadata {
        let path = with_extension(&base, "json");
        dump_metadata(dataset, &path)?;
        report.metadata_file = Some(path);
    }

    Ok(report)
}

/// Read a netCDF file and convert it under the key `base`.
///
/// `base` normally comes from [`ConvertConfig::output_bases`].
pub fn convert_file(
    path: &Path,
    base: &Path,
    method: Method,
    config: &ConvertConfig,
) -> Result<ConvertReport> {
    if !path.is_file() {
        return Err(NcflattenError::InputNotFound(path.to_path_buf()));
    }
    let loaded = load_dataset(path)?;
    let mut report = convert(&loaded.dataset, base, method, config)?;
    report.read_issues = loaded.issues;
    Ok(report)
}
