//! Typed, nullable column storage

use std::ops::Range;

use super::cell::{Cell, Type};
use crate::error::{Result, TableError};

/// Significant digits used when rendering float cells
const RENDER_PRECISION: usize = 2;

/// A single typed column. Every stored cell is either null or of the column's type.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    dtype: Type,
    data: Vec<Cell>,
}

impl Column {
    /// Create a column, casting every value through the type's caster
    pub fn new<I, V>(data: I, dtype: Type) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Cell>,
    {
        let data = data
            .into_iter()
            .map(|value| dtype.cast(value))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { dtype, data })
    }

    /// Create an empty column
    pub fn empty(dtype: Type) -> Self {
        Self {
            dtype,
            data: Vec::new(),
        }
    }

    /// Create a column of `len` nulls
    pub fn nulls(len: usize, dtype: Type) -> Self {
        Self {
            dtype,
            data: vec![Cell::Null; len],
        }
    }

    /// Build from cells already known to match `dtype`
    pub(crate) fn from_cells(data: Vec<Cell>, dtype: Type) -> Self {
        debug_assert!(data.iter().all(|cell| matches!(
            (cell, dtype),
            (Cell::Null, _) | (Cell::Float(_), Type::Float) | (Cell::String(_), Type::String)
        )));
        Self { dtype, data }
    }

    /// Declared type
    pub fn dtype(&self) -> Type {
        self.dtype
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cast a value into this column's type
    pub fn cast(&self, value: impl Into<Cell>) -> Result<Cell> {
        self.dtype.cast(value)
    }

    /// Get the cell at `index`
    pub fn get(&self, index: usize) -> Result<&Cell> {
        self.data
            .get(index)
            .ok_or_else(|| TableError::out_of_range(index, self.len()))
    }

    /// Get a contiguous run of cells
    pub fn slice(&self, range: Range<usize>) -> Result<&[Cell]> {
        self.check_range(&range)?;
        Ok(&self.data[range])
    }

    /// All cells in order
    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.data.iter()
    }

    /// Replace the cell at `index` with the cast value
    pub fn set(&mut self, index: usize, value: impl Into<Cell>) -> Result<()> {
        let len = self.len();
        let cell = self.cast(value)?;
        let slot = self
            .data
            .get_mut(index)
            .ok_or_else(|| TableError::out_of_range(index, len))?;
        *slot = cell;
        Ok(())
    }

    /// Append the cast value
    pub fn push(&mut self, value: impl Into<Cell>) -> Result<()> {
        let cell = self.cast(value)?;
        self.data.push(cell);
        Ok(())
    }

    /// Insert the cast value before `index`; `index == len` appends
    pub fn insert(&mut self, index: usize, value: impl Into<Cell>) -> Result<()> {
        if index > self.len() {
            return Err(TableError::out_of_range(index, self.len()));
        }
        let cell = self.cast(value)?;
        self.data.insert(index, cell);
        Ok(())
    }

    /// Remove and return the cell at `index`
    pub fn remove(&mut self, index: usize) -> Result<Cell> {
        if index >= self.len() {
            return Err(TableError::out_of_range(index, self.len()));
        }
        Ok(self.data.remove(index))
    }

    /// Remove a contiguous run of cells, shifting the tail left
    pub fn remove_range(&mut self, range: Range<usize>) -> Result<Vec<Cell>> {
        self.check_range(&range)?;
        Ok(self.data.drain(range).collect())
    }

    /// New column whose element `i` is `self[indices[i]]`.
    ///
    /// The index list must have the same length as the column; indices may repeat.
    pub fn permute(&self, indices: &[usize]) -> Result<Column> {
        if indices.len() != self.len() {
            return Err(TableError::LengthMismatch {
                expected: self.len(),
                found: indices.len(),
            });
        }
        self.take(indices)
    }

    /// Gather cells by index into a new column of any length
    pub fn take(&self, indices: &[usize]) -> Result<Column> {
        let data = indices
            .iter()
            .map(|&i| self.get(i).cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_cells(data, self.dtype))
    }

    /// Render one cell into a field of exactly `width` characters (longer floats overflow)
    pub fn render(&self, index: usize, width: usize) -> Result<String> {
        if width == 0 {
            return Err(TableError::argument("render width must be positive"));
        }
        let rendered = match (self.get(index)?, self.dtype) {
            (Cell::Null, Type::Float) => format!("{:>width$}", "n/a"),
            (Cell::Null, Type::String) => format!("{:<width$}", "n/a"),
            (Cell::Float(f), _) => format!("{:>width$}", format_general(*f, RENDER_PRECISION)),
            (Cell::String(s), _) => {
                let truncated: String = s.chars().take(width).collect();
                format!("{:<width$}", truncated)
            }
        };
        Ok(rendered)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.data
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.start > range.end {
            return Err(TableError::argument(format!(
                "range start {} exceeds end {}",
                range.start, range.end
            )));
        }
        if range.end > self.len() {
            return Err(TableError::out_of_range(range.end, self.len()));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// General number format with `precision` significant digits
/// (fixed notation for moderate exponents, scientific otherwise).
fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific.clone();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
