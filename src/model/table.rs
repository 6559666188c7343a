//! Table and Row structures

use indexmap::IndexMap;
use super::cell::{Cell, Type};
use super::column::Column;
use crate::error::{Result, TableError};

/// An ordered set of uniquely named, equal-length columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Columns in insertion order
    columns: IndexMap<String, Column>,
    /// Row count shared by every column
    size: usize,
}

impl Table {
    /// Create a table from a name → column mapping.
    ///
    /// Fails with `EmptyTable` for an empty mapping and `LengthMismatch`
    /// if the columns disagree on length. Columns are copied.
    pub fn new(columns: &IndexMap<String, Column>) -> Result<Self> {
        let size = common_length(columns.values())?;
        Ok(Self {
            columns: columns.clone(),
            size,
        })
    }

    /// Create a table from `(name, column)` pairs, rejecting duplicate names
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        let mut map = IndexMap::new();
        for (name, column) in columns {
            let name = name.into();
            if map.contains_key(&name) {
                return Err(TableError::DuplicateName(name));
            }
            map.insert(name, column);
        }
        let size = common_length(map.values())?;
        Ok(Self { columns: map, size })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Columns with their names, in order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> + '_ {
        self.columns.iter().map(|(name, col)| (name.as_str(), col))
    }

    /// Type of the named column
    pub fn column_type(&self, name: &str) -> Result<Type> {
        self.column(name).map(Column::dtype)
    }

    /// Row view at `index`
    pub fn row(&self, index: usize) -> Result<Row<'_>> {
        if index >= self.size {
            return Err(TableError::out_of_range(index, self.size));
        }
        Ok(Row { table: self, index })
    }

    /// Iterate over all rows in order. Each call starts a fresh pass.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            table: self,
            next: 0,
        }
    }

    /// Add a column under a new name; it must already have `len()` rows
    pub fn append_column(&mut self, name: impl Into<String>, column: &Column) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(TableError::DuplicateName(name));
        }
        if column.len() != self.size {
            return Err(TableError::LengthMismatch {
                expected: self.size,
                found: column.len(),
            });
        }
        self.columns.insert(name, column.clone());
        Ok(())
    }

    /// Append one value per column, cast to each column's type
    pub fn append_row<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Cell>,
    {
        let values: Vec<Cell> = values.into_iter().map(Into::into).collect();
        if values.len() != self.columns.len() {
            return Err(TableError::ArityMismatch {
                expected: self.columns.len(),
                found: values.len(),
            });
        }

        // Cast everything first so a bad value leaves the table untouched
        let cells = self
            .columns
            .values()
            .zip(values)
            .map(|(column, value)| column.cast(value))
            .collect::<Result<Vec<_>>>()?;

        for (column, cell) in self.columns.values_mut().zip(cells) {
            column.push(cell)?;
        }
        self.size += 1;
        Ok(())
    }

    /// Set one cell, cast to the column's type
    pub fn set_cell(&mut self, name: &str, row_index: usize, value: impl Into<Cell>) -> Result<()> {
        let column = self
            .columns
            .get_mut(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;
        column.set(row_index, value)
    }

    /// Build a table from columns produced by an operation on this one
    pub(crate) fn from_parts(columns: IndexMap<String, Column>) -> Result<Self> {
        let size = common_length(columns.values())?;
        Ok(Self { columns, size })
    }

    pub(crate) fn columns_mut(&mut self) -> impl Iterator<Item = (&str, &mut Column)> + '_ {
        self.columns.iter_mut().map(|(name, col)| (name.as_str(), col))
    }
}

/// Length shared by all columns
fn common_length<'a>(columns: impl IntoIterator<Item = &'a Column>) -> Result<usize> {
    let mut lengths = columns.into_iter().map(Column::len);
    let first = lengths.next().ok_or(TableError::EmptyTable)?;
    for len in lengths {
        if len != first {
            return Err(TableError::LengthMismatch {
                expected: first,
                found: len,
            });
        }
    }
    Ok(first)
}

/// Read-only view of one row of a table
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    /// Position of this row in its table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cells (one per column)
    pub fn len(&self) -> usize {
        self.table.column_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell by column position
    pub fn get(&self, position: usize) -> Option<&'a Cell> {
        let index = self.index;
        self.table
            .columns
            .get_index(position)
            .map(|(_, column)| &column.cells()[index])
    }

    /// Cell by column name
    pub fn get_by_name(&self, name: &str) -> Result<&'a Cell> {
        let column = self.table.column(name)?;
        Ok(&column.cells()[self.index])
    }

    /// Cells in column order
    pub fn iter(&self) -> impl Iterator<Item = &'a Cell> + 'a {
        let index = self.index;
        self.table
            .columns
            .values()
            .map(move |column| &column.cells()[index])
    }

    /// Owned copy of the cells
    pub fn to_vec(&self) -> Vec<Cell> {
        self.iter().cloned().collect()
    }
}

/// Iterator over the rows of a table
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    table: &'a Table,
    next: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.table.size {
            return None;
        }
        let row = Row {
            table: self.table,
            index: self.next,
        };
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.size - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}
