//! Loading tables from delimited text files

mod csv;

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::Config;
use crate::model::Table;

pub use self::csv::CsvParser;

/// Load a table from `path`, choosing the delimiter from the extension
pub fn load(path: &Path, config: &Config) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" | "txt" => CsvParser::new(config.delimiter).parse_file(path, config),
        "tsv" => CsvParser::new(b'\t').parse_file(path, config),
        other => bail!(
            "Unsupported file format: {}",
            if other.is_empty() { "unknown" } else { other }
        ),
    }
}
