//! ncflatten - Flatten multi-dimensional netCDF datasets into tables.
//!
//! ncflatten turns labeled N-dimensional datasets into strictly
//! two-dimensional tables that row/column formats such as CSV and Parquet
//! can hold.
//!
//! # Features
//!
//! - One table per dimension signature, indexed by the cartesian product of
//!   its coordinates
//! - A faceted single table indexed by time, with height-like dimensions
//!   exploded into labeled columns
//! - One table over every dimension, broadcasting variables as needed
//! - CSV and Parquet output with a JSON metadata side file
//!
//! # Example
//!
//! ```ignore
//! use ncflatten::data::read_dataset;
//! use ncflatten::engine::{flatten, partition};
//! use std::path::Path;
//!
//! let dataset = read_dataset(Path::new("buoy.nc"))?;
//!
//! for (key, table) in partition(&dataset, "out/buoy")? {
//!     println!("{}: {} rows", key, table.row_count());
//! }
//!
//! let flat = flatten(&dataset, "time")?;
//! for rejection in &flat.rejected {
//!     println!("skipped {}", rejection);
//! }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod output;

pub use config::ConvertConfig;
pub use error::{NcflattenError, Result};
