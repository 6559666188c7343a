//! Per-column summary statistics

use std::fmt;

use serde::Serialize;

use crate::model::{Table, Type};

/// Statistics for one column. Min, max and mean are only computed for float
/// columns with at least one non-null value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: Type,
    /// Non-null cells
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

/// Summary of a whole table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl Table {
    /// Compute per-column statistics
    pub fn summary(&self) -> Summary {
        let columns = self
            .columns()
            .map(|(name, column)| {
                let count = column.iter().filter(|c| !c.is_null()).count();
                let mut summary = ColumnSummary {
                    name: name.to_string(),
                    dtype: column.dtype(),
                    count,
                    min: None,
                    max: None,
                    mean: None,
                };
                if column.dtype() == Type::Float && count > 0 {
                    let values = column.iter().filter_map(|c| c.as_f64());
                    let (min, max, sum) = values.fold(
                        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
                        |(min, max, sum), v| (min.min(v), max.max(v), sum + v),
                    );
                    summary.min = Some(min);
                    summary.max = Some(max);
                    summary.mean = Some(sum / count as f64);
                }
                summary
            })
            .collect();

        Summary {
            rows: self.len(),
            columns,
        }
    }

    /// Human-readable statistics: min, max, mean and count for float columns,
    /// count for string columns
    pub fn describe(&self) -> String {
        self.summary().to_string()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12} {:<6} {:>8} {:>12} {:>12} {:>12}",
            "column", "type", "count", "min", "max", "mean"
        )?;
        for column in &self.columns {
            writeln!(
                f,
                "{:<12} {:<6} {:>8} {:>12} {:>12} {:>12}",
                column.name,
                column.dtype.to_string(),
                column.count,
                stat(column.min),
                stat(column.max),
                stat(column.mean)
            )?;
        }
        write!(f, "{} rows", self.rows)
    }
}

fn stat(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v))
}
