//! Output formatting for tables and summaries

mod json;
mod text;

use std::io::Write;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::model::Table;
use crate::ops::Summary;

pub use json::JsonOutput;
pub use text::{render_text, TextOutput};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a table to a writer
    fn render_table(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;

    /// Render summary statistics to a writer
    fn render_summary(&self, summary: &Summary, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, width: usize) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextOutput::new(width)),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render a table to stdout
pub fn render_to_stdout(table: &Table, format: OutputFormat, width: usize) -> Result<()> {
    let formatter = OutputFactory::create(format, width);
    let mut stdout = std::io::stdout().lock();
    formatter.render_table(table, &mut stdout)
}

/// Render summary statistics to stdout
pub fn summary_to_stdout(summary: &Summary, format: OutputFormat) -> Result<()> {
    let formatter = OutputFactory::create(format, crate::config::DEFAULT_WIDTH);
    let mut stdout = std::io::stdout().lock();
    formatter.render_summary(summary, &mut stdout)
}
