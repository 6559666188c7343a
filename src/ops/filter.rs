//! Row filtering by predicate on one column

use tracing::trace;

use super::take_rows;
use crate::error::Result;
use crate::model::{Cell, Table};

impl Table {
    /// Keep the rows whose cell in `col_name` satisfies `predicate`, in order.
    ///
    /// The predicate sees the stored (already cast) cell, including nulls.
    pub fn filter<P>(&self, col_name: &str, mut predicate: P) -> Result<Table>
    where
        P: FnMut(&Cell) -> bool,
    {
        let key = self.column(col_name)?;
        let kept: Vec<usize> = key
            .iter()
            .enumerate()
            .filter(|(_, cell)| predicate(*cell))
            .map(|(i, _)| i)
            .collect();

        trace!(column = col_name, kept = kept.len(), of = self.len(), "filtered rows");
        take_rows(self, &kept)
    }
}
