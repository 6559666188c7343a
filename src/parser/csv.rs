//! CSV file parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use tracing::debug;

use crate::config::Config;
use crate::model::{Cell, Column, Table, Type};

/// Parser for delimited text with a header row
pub struct CsvParser {
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse a file into a table
    pub fn parse_file(&self, path: &Path, config: &Config) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        self.parse_reader(BufReader::new(file), config)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse CSV text from any reader.
    ///
    /// A column is Float if every non-null field parses as a number, String
    /// otherwise. Short rows are padded with nulls.
    pub fn parse_reader<R: Read>(&self, reader: R, config: &Config) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() {
            bail!("CSV has no header row");
        }

        let mut fields: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // 1-indexed, after the header
            let record = result.with_context(|| format!("Failed to read CSV row {}", line))?;
            if record.len() > headers.len() {
                bail!(
                    "Row {} has {} fields but the header has {}",
                    line,
                    record.len(),
                    headers.len()
                );
            }
            for (i, values) in fields.iter_mut().enumerate() {
                values.push(parse_field(record.get(i).unwrap_or(""), config));
            }
        }

        let mut columns = IndexMap::with_capacity(headers.len());
        for (name, values) in headers.into_iter().zip(fields) {
            let dtype = infer_type(&values);
            debug!(column = %name, %dtype, rows = values.len(), "inferred column type");
            if columns.contains_key(&name) {
                bail!("Duplicate column name in header: {}", name);
            }
            let column = Column::new(values, dtype)
                .with_context(|| format!("Failed to build column {}", name))?;
            columns.insert(name, column);
        }

        Ok(Table::new(&columns)?)
    }
}

/// Turn a raw field into a cell (string or null); typing happens per column
fn parse_field(raw: &str, config: &Config) -> Cell {
    let trimmed = raw.trim();
    if config.is_null_token(trimmed) {
        Cell::Null
    } else {
        Cell::String(trimmed.to_string())
    }
}

/// Float if every non-null value parses as a number
fn infer_type(values: &[Cell]) -> Type {
    let all_numeric = values
        .iter()
        .filter_map(Cell::as_str)
        .all(|s| s.parse::<f64>().is_ok());
    if all_numeric {
        Type::Float
    } else {
        Type::String
    }
}
