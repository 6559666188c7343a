//! Hash-based inner join

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::Result;
use crate::model::{Cell, Table};

/// Suffix appended to a right-hand column whose name is already taken
const COLLISION_SUFFIX: &str = "_other";

/// Hashable form of a join key. Nulls and NaN have none and never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum JoinKey<'a> {
    Float(u64),
    String(&'a str),
}

impl<'a> JoinKey<'a> {
    fn from_cell(cell: &'a Cell) -> Option<Self> {
        match cell {
            Cell::Null => None,
            Cell::Float(f) if f.is_nan() => None,
            // -0.0 == 0.0 but their bits differ
            Cell::Float(f) if *f == 0.0 => Some(JoinKey::Float(0.0f64.to_bits())),
            Cell::Float(f) => Some(JoinKey::Float(f.to_bits())),
            Cell::String(s) => Some(JoinKey::String(s)),
        }
    }
}

/// Map each key to the row positions holding it, in row order
fn build_index(cells: &[Cell]) -> FxHashMap<JoinKey<'_>, Vec<usize>> {
    let mut index: FxHashMap<JoinKey<'_>, Vec<usize>> = FxHashMap::default();
    for (row, cell) in cells.iter().enumerate() {
        if let Some(key) = JoinKey::from_cell(cell) {
            index.entry(key).or_default().push(row);
        }
    }
    index
}

/// Probe `cells` against an index, yielding `(probe row, indexed row)` pairs
fn probe<'a>(
    cells: &'a [Cell],
    index: &'a FxHashMap<JoinKey<'a>, Vec<usize>>,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    cells.iter().enumerate().flat_map(move |(row, cell)| {
        JoinKey::from_cell(cell)
            .and_then(|key| index.get(&key))
            .into_iter()
            .flatten()
            .map(move |&other| (row, other))
    })
}

/// All matching `(left row, right row)` pairs, ordered by left row then right row.
///
/// The smaller side is the one indexed.
fn match_rows(left: &[Cell], right: &[Cell]) -> Vec<(usize, usize)> {
    if right.len() <= left.len() {
        let index = build_index(right);
        debug!(build_side = "right", keys = index.len(), "built join index");
        probe(left, &index).collect()
    } else {
        let index = build_index(left);
        debug!(build_side = "left", keys = index.len(), "built join index");
        let mut pairs: Vec<(usize, usize)> = probe(right, &index).map(|(r, l)| (l, r)).collect();
        pairs.sort_unstable();
        pairs
    }
}

impl Table {
    /// Inner join on `self[self_key] == other[other_key]`.
    ///
    /// Output columns are all of self's followed by all of other's; a name from
    /// `other` that is already taken gets `_other` appended until it is unique.
    pub fn inner_join(&self, other: &Table, self_key: &str, other_key: &str) -> Result<Table> {
        let left_key = self.column(self_key)?;
        let right_key = other.column(other_key)?;

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            match_rows(left_key.cells(), right_key.cells()).into_iter().unzip();
        debug!(
            left = self.len(),
            right = other.len(),
            matched = left_rows.len(),
            "inner join"
        );

        let mut columns = IndexMap::with_capacity(self.column_count() + other.column_count());
        for (name, column) in self.columns() {
            columns.insert(name.to_string(), column.take(&left_rows)?);
        }
        for (name, column) in other.columns() {
            let mut name = name.to_string();
            while columns.contains_key(&name) {
                name.push_str(COLLISION_SUFFIX);
            }
            columns.insert(name, column.take(&right_rows)?);
        }

        Table::from_parts(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::model::{Column, Type};

    fn people() -> Table {
        Table::from_columns([
            ("id", Column::new(vec![Some(1.0), Some(2.0), None, Some(3.0)], Type::Float).unwrap()),
            ("name", Column::new(["ann", "bob", "cid", "dee"], Type::String).unwrap()),
        ])
        .unwrap()
    }

    fn orders() -> Table {
        Table::from_columns([
            ("person", Column::new(vec![Some(2.0), Some(1.0), Some(2.0), None], Type::Float).unwrap()),
            ("name", Column::new(["pen", "ink", "pad", "cup"], Type::String).unwrap()),
        ])
        .unwrap()
    }

    fn strings(table: &Table, column: &str) -> Vec<String> {
        table
            .column(column)
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_inner_join_order_and_names() {
        let joined = people().inner_join(&orders(), "id", "person").unwrap();

        assert_eq!(
            joined.column_names().collect::<Vec<_>>(),
            vec!["id", "name", "person", "name_other"]
        );
        assert_eq!(joined.len(), 3);
        assert_eq!(strings(&joined, "name"), vec!["ann", "bob", "bob"]);
        assert_eq!(strings(&joined, "name_other"), vec!["ink", "pen", "pad"]);
    }

    #[test]
    fn test_inner_join_same_order_whichever_side_is_indexed() {
        let small = Table::from_columns([(
            "k",
            Column::new([2.0, 1.0], Type::Float).unwrap(),
        )])
        .unwrap();
        let big = Table::from_columns([(
            "k",
            Column::new([1.0, 2.0, 1.0, 2.0, 5.0], Type::Float).unwrap(),
        )])
        .unwrap();

        let joined = small.inner_join(&big, "k", "k").unwrap();
        assert_eq!(strings(&joined, "k"), vec!["2.0", "2.0", "1.0", "1.0"]);
        assert_eq!(strings(&joined, "k_other"), vec!["2.0", "2.0", "1.0", "1.0"]);

        let joined = big.inner_join(&small, "k", "k").unwrap();
        assert_eq!(strings(&joined, "k"), vec!["1.0", "2.0", "1.0", "2.0"]);
    }

    #[test]
    fn test_inner_join_nulls_never_match() {
        let left = Table::from_columns([(
            "k",
            Column::new(vec![None, Some("a")], Type::String).unwrap(),
        )])
        .unwrap();
        let right = Table::from_columns([(
            "k",
            Column::new(vec![None::<&str>, None], Type::String).unwrap(),
        )])
        .unwrap();
        let joined = left.inner_join(&right, "k", "k").unwrap();
        assert!(joined.is_empty());
        assert_eq!(joined.column_count(), 2);
    }

    #[test]
    fn test_inner_join_repeated_suffix() {
        let left = Table::from_columns([
            ("k", Column::new([1.0], Type::Float).unwrap()),
            ("k_other", Column::new([7.0], Type::Float).unwrap()),
        ])
        .unwrap();
        let right = Table::from_columns([("k", Column::new([1.0], Type::Float).unwrap())]).unwrap();
        let joined = left.inner_join(&right, "k", "k").unwrap();
        assert_eq!(
            joined.column_names().collect::<Vec<_>>(),
            vec!["k", "k_other", "k_other_other"]
        );
    }

    #[test]
    fn test_inner_join_mismatched_key_types_do_not_match() {
        let left = Table::from_columns([("k", Column::new([1.0], Type::Float).unwrap())]).unwrap();
        let right = Table::from_columns([("k", Column::new(["1"], Type::String).unwrap())]).unwrap();
        assert!(left.inner_join(&right, "k", "k").unwrap().is_empty());
    }

    #[test]
    fn test_inner_join_unknown_key() {
        assert_eq!(
            people().inner_join(&orders(), "id", "missing"),
            Err(TableError::UnknownColumn("missing".into()))
        );
    }
}
