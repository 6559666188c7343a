//! Row/column transpose with type unification

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Column, Table, Type};

impl Table {
    /// Swap rows and columns.
    ///
    /// Output column `colN` holds row `N`. All output columns share one type:
    /// String if any input column is String, otherwise Float. A table without
    /// rows has nothing to become columns and fails with `EmptyTable`.
    pub fn transpose(&self) -> Result<Table> {
        let dtype = self
            .columns()
            .map(|(_, column)| column.dtype())
            .fold(Type::Float, Type::widen);

        let columns = self
            .rows()
            .map(|row| -> Result<(String, Column)> {
                Ok((format!("col{}", row.index()), Column::new(row.iter(), dtype)?))
            })
            .collect::<Result<IndexMap<_, _>>>()?;
        Table::from_parts(columns)
    }
}
