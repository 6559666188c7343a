//! Stable single-key sort

use std::cmp::Ordering;

use tracing::debug;

use super::permute_rows;
use crate::error::Result;
use crate::model::{Cell, Table};

impl Table {
    /// Sort rows by `col_name`. Ties keep their original order and nulls go last
    /// in both directions.
    pub fn sort(&self, col_name: &str, ascending: bool) -> Result<Table> {
        let key = self.column(col_name)?;
        let order = sort_order(key.cells(), ascending);
        debug!(column = col_name, ascending, rows = order.len(), "sorting table");
        permute_rows(self, &order)
    }
}

/// Permutation that orders `cells`
fn sort_order(cells: &[Cell], ascending: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..cells.len()).collect();
    // slice::sort_by is stable
    order.sort_by(|&a, &b| compare_cells(&cells[a], &cells[b], ascending));
    order
}

fn compare_cells(a: &Cell, b: &Cell, ascending: bool) -> Ordering {
    let ordering = match (a, b) {
        (Cell::Null, Cell::Null) => return Ordering::Equal,
        (Cell::Null, _) => return Ordering::Greater,
        (_, Cell::Null) => return Ordering::Less,
        (Cell::Float(a), Cell::Float(b)) => a.total_cmp(b),
        (Cell::String(a), Cell::String(b)) => a.cmp(b),
        // a column never mixes kinds
        _ => Ordering::Equal,
    };
    if ascending {
        ordering
    } else {
        ordering.reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::model::{Column, Type};

    fn table() -> Table {
        Table::from_columns([
            ("k", Column::new(vec![Some(3.0), None, Some(1.0), Some(3.0), Some(2.0)], Type::Float).unwrap()),
            ("tag", Column::new(["a", "b", "c", "d", "e"], Type::String).unwrap()),
        ])
        .unwrap()
    }

    fn tags(table: &Table) -> Vec<String> {
        table
            .column("tag")
            .unwrap()
            .iter()
            .map(|c| c.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_sort_ascending_is_stable_with_nulls_last() {
        let sorted = table().sort("k", true).unwrap();
        assert_eq!(tags(&sorted), vec!["c", "e", "a", "d", "b"]);
    }

    #[test]
    fn test_sort_descending_keeps_nulls_last() {
        let sorted = table().sort("k", false).unwrap();
        assert_eq!(tags(&sorted), vec!["a", "d", "e", "c", "b"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let once = table().sort("k", true).unwrap();
        let twice = once.sort("k", true).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_strings() {
        let sorted = table().sort("tag", false).unwrap();
        assert_eq!(tags(&sorted), vec!["e", "d", "c", "b", "a"]);
    }

    #[test]
    fn test_sort_unknown_column() {
        assert_eq!(
            table().sort("zz", true),
            Err(TableError::UnknownColumn("zz".into()))
        );
    }
}
