//! tabula - small in-memory columnar tables
//!
//! Named, independently typed columns (float or string, both nullable) that
//! share one row count, with row and column views and relational operations:
//! filter, sort, inner join, product, cumulative product, shift, replace,
//! transpose, and describe.

pub mod config;
pub mod error;
pub mod model;
pub mod ops;
pub mod output;
pub mod parser;

pub use config::Config;
pub use error::{Result, TableError};
pub use model::{Cell, Column, Row, Table, Type};
pub use ops::Axis;
