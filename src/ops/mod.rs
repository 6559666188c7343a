//! Table operations. Every operation except `replace` returns a freshly owned table.

mod describe;
mod filter;
mod join;
mod reduce;
mod sort;
mod transpose;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Column, Table};

pub use describe::{ColumnSummary, Summary};
pub use reduce::Axis;

/// Gather rows by index into a new table (indices may repeat or be fewer than `len`)
fn take_rows(table: &Table, indices: &[usize]) -> Result<Table> {
    let columns = table
        .columns()
        .map(|(name, column)| -> Result<(String, Column)> {
            Ok((name.to_string(), column.take(indices)?))
        })
        .collect::<Result<IndexMap<_, _>>>()?;
    Table::from_parts(columns)
}

/// Reorder every column with the same full-length permutation
fn permute_rows(table: &Table, order: &[usize]) -> Result<Table> {
    let columns = table
        .columns()
        .map(|(name, column)| -> Result<(String, Column)> {
            Ok((name.to_string(), column.permute(order)?))
        })
        .collect::<Result<IndexMap<_, _>>>()?;
    Table::from_parts(columns)
}
