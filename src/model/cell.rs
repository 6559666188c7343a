//! Cell values, column types, and the per-type casters

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Declared type of a column, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Float,
    String,
}

impl Type {
    /// Cast a value into this type (null stays null)
    pub fn cast(self, value: impl Into<Cell>) -> Result<Cell> {
        match self {
            Type::Float => to_float(value.into()),
            Type::String => Ok(to_string(value.into())),
        }
    }

    /// Unify two types: String wins over Float
    pub fn widen(self, other: Type) -> Type {
        match (self, other) {
            (Type::Float, Type::Float) => Type::Float,
            _ => Type::String,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
        }
    }
}

/// A single value in a column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Float(f64),
    String(String),
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Null, Cell::Null) => true,
            (Cell::Float(a), Cell::Float(b)) => {
                // NaN compares equal to itself so replace can target it
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Cell::String(a), Cell::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Cell {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Numeric payload, if this is a float cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text payload, if this is a string cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "n/a"),
            Cell::Float(v) => write!(f, "{}", float_repr(*v)),
            Cell::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Float(f)
    }
}

impl From<i32> for Cell {
    fn from(i: i32) -> Self {
        Cell::Float(f64::from(i))
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Float(i as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::String(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::String(s)
    }
}

impl From<&Cell> for Cell {
    fn from(c: &Cell) -> Self {
        c.clone()
    }
}

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Cell::Null,
        }
    }
}

/// Cast to a float cell; strings are parsed, anything unparsable is a `CastFailure`
pub fn to_float(cell: Cell) -> Result<Cell> {
    match cell {
        Cell::Null => Ok(Cell::Null),
        Cell::Float(f) => Ok(Cell::Float(f)),
        Cell::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => Ok(Cell::Float(f)),
            Err(_) => Err(TableError::CastFailure {
                value: s,
                dtype: Type::Float,
            }),
        },
    }
}

/// Cast to a string cell; never fails
pub fn to_string(cell: Cell) -> Cell {
    match cell {
        Cell::Null => Cell::Null,
        Cell::Float(f) => Cell::String(float_repr(f)),
        Cell::String(s) => Cell::String(s),
    }
}

/// Shortest round-tripping text for a float, always with a fractional part.
/// Exponents carry a sign and at least two digits (`1e+16`, `1e-07`).
fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    let repr = format!("{:?}", f);
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return repr.clone();
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}
