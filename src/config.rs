//! Configuration handling for tabula

use std::path::PathBuf;

use crate::ops::Axis;

/// Cell width used by the fixed-width renderer
pub const DEFAULT_WIDTH: usize = 12;

/// Output format for rendered tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for loading, transforming and rendering a table
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the input file
    pub input: PathBuf,
    /// Output format
    pub output_format: OutputFormat,
    /// Width of each rendered cell
    pub width: usize,
    /// CSV field delimiter
    pub delimiter: u8,
    /// Field values read as null
    pub null_tokens: Vec<String>,
    /// Column to sort by
    pub sort_by: Option<String>,
    /// Sort descending instead of ascending
    pub descending: bool,
    /// Shift rows down by this many periods
    pub shift: Option<i64>,
    /// Replace the table with its running product
    pub cumprod: Option<Axis>,
    /// Replace the table with its product
    pub product: Option<Axis>,
    /// Transpose the (transformed) table
    pub transpose: bool,
    /// Print statistics instead of the table
    pub describe: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_format: OutputFormat::default(),
            width: DEFAULT_WIDTH,
            delimiter: b',',
            null_tokens: vec![
                String::new(),
                "NA".to_string(),
                "null".to_string(),
                "n/a".to_string(),
            ],
            sort_by: None,
            descending: false,
            shift: None,
            cumprod: None,
            product: None,
            transpose: false,
            describe: false,
        }
    }
}

impl Config {
    /// Create a new Config for an input file
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set rendered cell width
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set CSV delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the field values treated as null
    pub fn with_null_tokens(mut self, tokens: Vec<String>) -> Self {
        self.null_tokens = tokens;
        self
    }

    /// Sort by a column
    pub fn with_sort_by(mut self, column: String, descending: bool) -> Self {
        self.sort_by = Some(column);
        self.descending = descending;
        self
    }

    /// Shift rows down
    pub fn with_shift(mut self, periods: i64) -> Self {
        self.shift = Some(periods);
        self
    }

    /// Take the running product along an axis
    pub fn with_cumprod(mut self, axis: Axis) -> Self {
        self.cumprod = Some(axis);
        self
    }

    /// Take the product along an axis
    pub fn with_product(mut self, axis: Axis) -> Self {
        self.product = Some(axis);
        self
    }

    /// Transpose the result
    pub fn with_transpose(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }

    /// Print statistics instead of the table
    pub fn with_describe(mut self, describe: bool) -> Self {
        self.describe = describe;
        self
    }

    /// Is `field` one of the configured null tokens
    pub fn is_null_token(&self, field: &str) -> bool {
        self.null_tokens.iter().any(|t| t == field)
    }
}
