//! tabula - load a table, transform it, and print it

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tabula::config::{Config, OutputFormat, DEFAULT_WIDTH};
use tabula::output::{render_to_stdout, summary_to_stdout};
use tabula::{parser, Axis};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Load a CSV file into a typed table and print it, optionally transformed
#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file (csv, tsv, txt)
    file: PathBuf,

    /// Sort rows by this column
    #[arg(short, long)]
    sort_by: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort_by")]
    descending: bool,

    /// Shift rows down by N periods
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    shift: Option<i64>,

    /// Running product along an axis (0/rows or 1/columns)
    #[arg(long, value_name = "AXIS")]
    cumprod: Option<Axis>,

    /// Product along an axis (0/rows or 1/columns)
    #[arg(long, value_name = "AXIS")]
    product: Option<Axis>,

    /// Transpose the result
    #[arg(long)]
    transpose: bool,

    /// Print per-column statistics instead of the table
    #[arg(long)]
    describe: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: CliOutputFormat,

    /// Width of each rendered cell
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Field delimiter for csv and txt input (a single ASCII character)
    #[arg(short, long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// Field value read as null; repeat for several (replaces the defaults)
    #[arg(long = "null", value_name = "TOKEN")]
    null_tokens: Vec<String>,
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be one ASCII character, got {:?}", s)),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config {
        input: cli.file,
        output_format: cli.format.into(),
        width: cli.width,
        sort_by: cli.sort_by,
        descending: cli.descending,
        shift: cli.shift,
        cumprod: cli.cumprod,
        product: cli.product,
        transpose: cli.transpose,
        describe: cli.describe,
        ..Config::default()
    };
    if let Some(delimiter) = cli.delimiter {
        config = config.with_delimiter(delimiter);
    }
    if !cli.null_tokens.is_empty() {
        config = config.with_null_tokens(cli.null_tokens);
    }

    let mut table = parser::load(&config.input, &config)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;

    if let Some(ref column) = config.sort_by {
        table = table.sort(column, !config.descending)?;
    }
    if let Some(periods) = config.shift {
        table = table.shift(periods)?;
    }
    if let Some(axis) = config.cumprod {
        table = table.cumprod(axis)?;
    }
    if let Some(axis) = config.product {
        table = table.product(axis)?;
    }
    if config.transpose {
        table = table.transpose()?;
    }

    if config.describe {
        summary_to_stdout(&table.summary(), config.output_format)
    } else {
        render_to_stdout(&table, config.output_format, config.width)
    }
}
