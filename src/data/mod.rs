//! Data module - year table and chart spec derivation

mod processor;
mod table;

pub use processor::{derive, ChartSpec};
pub use table::{Cell, MalformedTableError, YearCount, LIBMESH_CITATIONS};
