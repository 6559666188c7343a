//! Data model: cells, typed columns, and tables

mod cell;
mod column;
mod table;

pub use cell::{to_float, to_string, Cell, Type};
pub use column::Column;
pub use table::{Row, Rows, Table};
