//! Null-aware reductions and row-window transforms

use std::str::FromStr;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{Result, TableError};
use crate::model::{Cell, Column, Table, Type};

/// Name of the single column produced by `product`
const PRODUCT_COLUMN: &str = "product";

/// Direction of a reduction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Axis {
    /// Axis 0: reduce down each column
    #[default]
    Rows,
    /// Axis 1: reduce across each row
    Columns,
}

impl TryFrom<i64> for Axis {
    type Error = TableError;

    fn try_from(axis: i64) -> Result<Self> {
        match axis {
            0 => Ok(Axis::Rows),
            1 => Ok(Axis::Columns),
            _ => Err(TableError::argument(format!("axis must be 0 or 1, got {}", axis))),
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "rows" | "index" => Ok(Axis::Rows),
            "1" | "columns" => Ok(Axis::Columns),
            _ => Err(format!("Unknown axis: {}", s)),
        }
    }
}

impl Table {
    /// Product per column (`Axis::Rows`) or per row (`Axis::Columns`).
    ///
    /// Returns a single float column named `product`. Any null in the
    /// reduced cells makes that product null.
    pub fn product(&self, axis: Axis) -> Result<Table> {
        let columns = self.float_columns()?;
        let products: Vec<Cell> = match axis {
            Axis::Rows => columns.iter().map(|cells| product_of(cells.iter())).collect(),
            Axis::Columns => (0..self.len())
                .map(|row| product_of(columns.iter().map(|cells| &cells[row])))
                .collect(),
        };
        Table::from_columns([(PRODUCT_COLUMN, Column::from_cells(products, Type::Float))])
    }

    /// Running product down each column (`Axis::Rows`) or across each row
    /// (`Axis::Columns`). Names and shape are kept. Once a null is met the
    /// rest of that run is null.
    pub fn cumprod(&self, axis: Axis) -> Result<Table> {
        let columns = self.float_columns()?;
        let outputs: Vec<Vec<Cell>> = match axis {
            Axis::Rows => columns
                .iter()
                .map(|cells| running_product(cells.iter()))
                .collect(),
            Axis::Columns => {
                let mut outputs = vec![Vec::with_capacity(self.len()); columns.len()];
                for row in 0..self.len() {
                    let run = running_product(columns.iter().map(|cells| &cells[row]));
                    for (output, cell) in outputs.iter_mut().zip(run) {
                        output.push(cell);
                    }
                }
                outputs
            }
        };

        let columns = self
            .column_names()
            .zip(outputs)
            .map(|(name, cells)| (name.to_string(), Column::from_cells(cells, Type::Float)))
            .collect();
        Table::from_parts(columns)
    }

    /// Shift every column down by `periods` rows, filling the top with nulls.
    ///
    /// Length and column types are kept; values pushed past the end are dropped.
    /// `periods >= len()` gives an all-null table.
    pub fn shift(&self, periods: i64) -> Result<Table> {
        if periods < 0 {
            return Err(TableError::argument(format!(
                "shift periods must be non-negative, got {}",
                periods
            )));
        }
        let size = self.len();
        let periods = usize::try_from(periods).map_or(size, |p| p.min(size));
        debug!(periods, rows = size, "shifting table");

        let columns: IndexMap<String, Column> = self
            .columns()
            .map(|(name, column)| {
                let mut cells = vec![Cell::Null; periods];
                cells.extend_from_slice(&column.cells()[..size - periods]);
                (name.to_string(), Column::from_cells(cells, column.dtype()))
            })
            .collect();
        Table::from_parts(columns)
    }

    /// Overwrite, in place, every cell equal to one of `to_replace` with `value`
    /// cast to that cell's column type. Returns the number of cells replaced.
    /// Use `replace_value` for a single target.
    ///
    /// Matching compares stored cells as-is (a float never equals a string);
    /// a null in `to_replace` matches null cells. Nothing is changed if the
    /// value cannot be cast for some column that has a match.
    pub fn replace<I, V>(&mut self, to_replace: I, value: V) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
        V: Into<Cell>,
    {
        let targets: Vec<Cell> = to_replace.into_iter().map(Into::into).collect();
        let value = value.into();

        // Plan every change before touching any column
        let mut plan: Vec<Option<(Vec<usize>, Cell)>> = Vec::with_capacity(self.column_count());
        for (_, column) in self.columns() {
            let hits: Vec<usize> = column
                .iter()
                .enumerate()
                .filter(|(_, cell)| targets.contains(cell))
                .map(|(i, _)| i)
                .collect();
            if hits.is_empty() {
                plan.push(None);
            } else {
                plan.push(Some((hits, column.cast(value.clone())?)));
            }
        }

        let mut replaced = 0;
        for ((name, column), change) in self.columns_mut().zip(plan) {
            let Some((hits, cell)) = change else {
                continue;
            };
            trace!(column = name, cells = hits.len(), "replacing values");
            let cells = column.cells_mut();
            for i in hits {
                cells[i] = cell.clone();
                replaced += 1;
            }
        }
        Ok(replaced)
    }

    /// `replace` for a single target cell
    pub fn replace_value(&mut self, target: impl Into<Cell>, value: impl Into<Cell>) -> Result<usize> {
        self.replace([target.into()], value)
    }

    /// Cells of every column, failing if any column is not float
    fn float_columns(&self) -> Result<Vec<&[Cell]>> {
        self.columns()
            .map(|(name, column)| match column.dtype() {
                Type::Float => Ok(column.cells()),
                Type::String => Err(TableError::TypeMismatch {
                    column: name.to_string(),
                    expected: Type::Float,
                }),
            })
            .collect()
    }
}

/// Product of float cells; null if any cell is null
fn product_of<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Cell {
    let mut product = 1.0;
    for cell in cells {
        match cell.as_f64() {
            Some(v) => product *= v,
            None => return Cell::Null,
        }
    }
    Cell::Float(product)
}

/// Running product; null from the first null onward
fn running_product<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Vec<Cell> {
    let mut acc = Some(1.0);
    cells
        .into_iter()
        .map(|cell| {
            acc = acc.zip(cell.as_f64()).map(|(a, v)| a * v);
            acc.map_or(Cell::Null, Cell::Float)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Table {
        Table::from_columns([
            ("a", Column::new([7.0, 5.0, 6.0], Type::Float).unwrap()),
            ("b", Column::new([1.0, 2.3, 0.5], Type::Float).unwrap()),
            ("c", Column::new([5.0, 47.0, 4.0], Type::Float).unwrap()),
        ])
        .unwrap()
    }

    fn floats(table: &Table, name: &str) -> Vec<Option<f64>> {
        table
            .column(name)
            .unwrap()
            .iter()
            .map(Cell::as_f64)
            .collect()
    }

    fn assert_close(actual: &[Option<f64>], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            let a = a.expect("unexpected null");
            assert!((a - e).abs() < 1e-9, "{} != {}", a, e);
        }
    }

    #[test]
    fn test_axis_conversions() {
        assert_eq!(Axis::try_from(0i64), Ok(Axis::Rows));
        assert_eq!(Axis::try_from(1i64), Ok(Axis::Columns));
        assert!(Axis::try_from(2i64).is_err());
        assert_eq!("columns".parse::<Axis>(), Ok(Axis::Columns));
        assert!("sideways".parse::<Axis>().is_err());
    }

    #[test]
    fn test_product_per_column() {
        let product = abc().product(Axis::Rows).unwrap();
        assert_eq!(product.column_names().collect::<Vec<_>>(), vec!["product"]);
        assert_close(&floats(&product, "product"), &[210.0, 1.15, 940.0]);
    }

    #[test]
    fn test_product_per_row() {
        let product = abc().product(Axis::Columns).unwrap();
        assert_close(&floats(&product, "product"), &[35.0, 540.5, 12.0]);
    }

    #[test]
    fn test_product_null_propagates() {
        let table = Table::from_columns([
            ("a", Column::new(vec![Some(2.0), None], Type::Float).unwrap()),
            ("b", Column::new([3.0, 4.0], Type::Float).unwrap()),
        ])
        .unwrap();
        let product = table.product(Axis::Rows).unwrap();
        assert_eq!(floats(&product, "product"), vec![None, Some(12.0)]);
        let product = table.product(Axis::Columns).unwrap();
        assert_eq!(floats(&product, "product"), vec![Some(6.0), None]);
    }

    #[test]
    fn test_product_rejects_strings() {
        let table = Table::from_columns([("s", Column::new(["x"], Type::String).unwrap())]).unwrap();
        assert_eq!(
            table.product(Axis::Rows),
            Err(TableError::TypeMismatch {
                column: "s".into(),
                expected: Type::Float
            })
        );
    }

    #[test]
    fn test_cumprod_down_columns() {
        let table = Table::from_columns([("x", Column::new([2.0, 3.0, 4.0], Type::Float).unwrap())]).unwrap();
        let out = table.cumprod(Axis::Rows).unwrap();
        assert_eq!(floats(&out, "x"), vec![Some(2.0), Some(6.0), Some(24.0)]);
    }

    #[test]
    fn test_cumprod_across_rows() {
        let out = abc().cumprod(Axis::Columns).unwrap();
        assert_eq!(out.column_names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_close(&floats(&out, "a"), &[7.0, 5.0, 6.0]);
        assert_close(&floats(&out, "b"), &[7.0, 11.5, 3.0]);
        assert_close(&floats(&out, "c"), &[35.0, 540.5, 12.0]);
    }

    #[test]
    fn test_cumprod_null_poisons_the_run() {
        let table = Table::from_columns([(
            "x",
            Column::new(vec![Some(2.0), None, Some(4.0)], Type::Float).unwrap(),
        )])
        .unwrap();
        let out = table.cumprod(Axis::Rows).unwrap();
        assert_eq!(floats(&out, "x"), vec![Some(2.0), None, None]);
    }

    #[test]
    fn test_cumprod_null_poisons_the_rest_of_a_row() {
        let table = Table::from_columns([
            ("a", Column::new([2.0, 1.0], Type::Float).unwrap()),
            ("b", Column::new(vec![None, Some(3.0)], Type::Float).unwrap()),
            ("c", Column::new([4.0, 5.0], Type::Float).unwrap()),
        ])
        .unwrap();
        let out = table.cumprod(Axis::Columns).unwrap();
        assert_eq!(floats(&out, "a"), vec![Some(2.0), Some(1.0)]);
        assert_eq!(floats(&out, "b"), vec![None, Some(3.0)]);
        assert_eq!(floats(&out, "c"), vec![None, Some(15.0)]);
    }

    #[test]
    fn test_cumprod_rejects_strings() {
        let table = Table::from_columns([
            ("n", Column::new([1.0], Type::Float).unwrap()),
            ("s", Column::new(["x"], Type::String).unwrap()),
        ])
        .unwrap();
        for axis in [Axis::Rows, Axis::Columns] {
            assert_eq!(
                table.cumprod(axis),
                Err(TableError::TypeMismatch {
                    column: "s".into(),
                    expected: Type::Float
                })
            );
        }
    }

    #[test]
    fn test_shift() {
        let table = abc();
        let shifted = table.shift(1).unwrap();
        assert_eq!(shifted.len(), 3);
        assert_eq!(floats(&shifted, "a"), vec![None, Some(7.0), Some(5.0)]);

        assert_eq!(table.shift(0).unwrap(), table);

        let all_null = table.shift(10).unwrap();
        assert_eq!(all_null.len(), 3);
        assert!(all_null.column("c").unwrap().iter().all(Cell::is_null));

        assert!(matches!(table.shift(-1), Err(TableError::Argument(_))));
    }

    #[test]
    fn test_shift_keeps_string_type() {
        let table = Table::from_columns([("s", Column::new(["x", "y"], Type::String).unwrap())]).unwrap();
        let shifted = table.shift(1).unwrap();
        assert_eq!(shifted.column_type("s"), Ok(Type::String));
        assert_eq!(shifted.column("s").unwrap().cells(), &[Cell::Null, Cell::from("x")]);
    }

    #[test]
    fn test_replace() {
        let mut table = abc();
        let replaced = table.replace([7.0, 5.0], 13.0).unwrap();
        assert_eq!(floats(&table, "a"), vec![Some(13.0), Some(13.0), Some(6.0)]);
        assert_eq!(floats(&table, "c"), vec![Some(13.0), Some(47.0), Some(4.0)]);
        assert_eq!(replaced, 3);
    }

    #[test]
    fn test_replace_single_value() {
        let mut table = abc();
        assert_eq!(table.replace_value(5.0, 0.0), Ok(1));
        assert_eq!(floats(&table, "a"), vec![Some(7.0), Some(0.0), Some(6.0)]);
        assert_eq!(table.replace_value("5", 1.0), Ok(0));
    }

    #[test]
    fn test_replace_casts_per_column() {
        let mut table = Table::from_columns([
            ("n", Column::new(vec![None, Some(1.0)], Type::Float).unwrap()),
            ("s", Column::new(vec![None, Some("v")], Type::String).unwrap()),
        ])
        .unwrap();
        table.replace([Cell::Null], 0.0).unwrap();
        assert_eq!(table.column("n").unwrap().cells(), &[Cell::Float(0.0), Cell::Float(1.0)]);
        assert_eq!(table.column("s").unwrap().cells(), &[Cell::from("0.0"), Cell::from("v")]);
    }

    #[test]
    fn test_replace_failure_leaves_table_unchanged() {
        let mut table = Table::from_columns([
            ("s", Column::new(vec![None, Some("v")], Type::String).unwrap()),
            ("n", Column::new(vec![None, Some(1.0)], Type::Float).unwrap()),
        ])
        .unwrap();
        let before = table.clone();
        assert!(matches!(
            table.replace([Cell::Null], "word"),
            Err(TableError::CastFailure { .. })
        ));
        assert_eq!(table, before);
    }
}
