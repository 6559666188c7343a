//! JSON output format

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::model::{Cell, Table, Type};
use crate::ops::Summary;

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    fn write<T: Serialize>(&self, value: &T, writer: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable column for JSON output
#[derive(Serialize)]
struct JsonColumn<'a> {
    name: &'a str,
    dtype: Type,
    values: &'a [Cell],
}

#[derive(Serialize)]
struct JsonTable<'a> {
    rows: usize,
    columns: Vec<JsonColumn<'a>>,
}

impl OutputFormatter for JsonOutput {
    fn render_table(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let output = JsonTable {
            rows: table.len(),
            columns: table
                .columns()
                .map(|(name, column)| JsonColumn {
                    name,
                    dtype: column.dtype(),
                    values: column.cells(),
                })
                .collect(),
        };
        self.write(&output, writer)
    }

    fn render_summary(&self, summary: &Summary, writer: &mut dyn Write) -> Result<()> {
        self.write(summary, writer)
    }
}
