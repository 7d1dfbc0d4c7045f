//! CSV writer.

use crate::engine::Table;
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a table as CSV: a header line, then one line per row.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_table(table, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write a table as CSV to any writer.
pub fn write_table<W: Write>(table: &Table, out: &mut W) -> Result<()> {
    let header: Vec<String> = table.header().into_iter().map(quote).collect();
    writeln!(out, "{}", header.join(","))?;

    let mut line = String::new();
    for position in table.rows() {
        line.clear();
        for (i, value) in table.row(&position).into_iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            // Missing values are left empty.
            if !value.is_nan() {
                line.push_str(&value.to_string());
            }
        }
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
