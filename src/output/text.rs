//! Fixed-width text rendering

use std::fmt;
use std::io::Write;

use anyhow::Result;

use crate::config::DEFAULT_WIDTH;
use crate::error::TableError;
use crate::model::Table;
use crate::ops::Summary;

use super::OutputFormatter;

/// Render a table as aligned text.
///
/// The header holds the column names left-aligned to `width`; each following
/// line holds one row, every cell rendered to `width` characters. Fields are
/// separated by a single space.
pub fn render_text(table: &Table, width: usize) -> crate::Result<String> {
    if width == 0 {
        return Err(TableError::argument("render width must be positive"));
    }

    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(
        table
            .column_names()
            .map(|name| format!("{:<width$}", name))
            .collect::<Vec<_>>()
            .join(" "),
    );
    for row in 0..table.len() {
        let cells = table
            .columns()
            .map(|(_, column)| column.render(row, width))
            .collect::<crate::Result<Vec<_>>>()?;
        lines.push(cells.join(" "));
    }
    Ok(lines.join("\n"))
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = render_text(self, DEFAULT_WIDTH).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Plain aligned text output
pub struct TextOutput {
    width: usize,
}

impl TextOutput {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Default for TextOutput {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl OutputFormatter for TextOutput {
    fn render_table(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "{}", render_text(table, self.width)?)?;
        Ok(())
    }

    fn render_summary(&self, summary: &Summary, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "{}", summary)?;
        Ok(())
    }
}
