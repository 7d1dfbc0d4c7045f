//! Parquet writer.

use crate::engine::Table;
use crate::error::Result;
use arrow2::array::{Array, Float64Array};
use arrow2::chunk::Chunk;
use arrow2::datatypes::{DataType, Field, Schema};
use arrow2::io::parquet::write::{
    transverse, CompressionOptions, Encoding, FileWriter, RowGroupIterator, Version, WriteOptions,
};
use std::fs::File;
use std::path::Path;

const WRITE_OPTIONS: WriteOptions = WriteOptions {
    write_statistics: true,
    compression: CompressionOptions::Uncompressed,
    version: Version::V2,
    data_pagesize_limit: None,
};

/// Write a table as a single-row-group Parquet file.
///
/// Index axes and value columns all become nullable `Float64` columns;
/// NaN values are stored as nulls.
pub fn write_parquet(table: &Table, path: &Path) -> Result<()> {
    let columns = table.materialize();

    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, _)| Field::new(*name, DataType::Float64, true))
        .collect();
    let schema = Schema::from(fields);

    let arrays: Vec<Box<dyn Array>> = columns
        .into_iter()
        .map(|(_, values)| {
            let values: Vec<Option<f64>> = values
                .into_iter()
                .map(|v| if v.is_nan() { None } else { Some(v) })
                .collect();
            Box::new(Float64Array::from(values)) as Box<dyn Array>
        })
        .collect();
    let chunk = Chunk::try_new(arrays)?;

    let encodings: Vec<Vec<Encoding>> = schema
        .fields
        .iter()
        .map(|f| transverse(&f.data_type, |_| Encoding::Plain))
        .collect();
    let row_groups =
        RowGroupIterator::try_new(std::iter::once(Ok(chunk)), &schema, WRITE_OPTIONS, encodings)?;

    let file = File::create(path)?;
    let mut writer = FileWriter::try_new(file, schema, WRITE_OPTIONS)?;
    for group in row_groups {
        writer.write(group?)?;
    }
    writer.end(None)?;
    Ok(())
}
