//! Yearly "papers by people using libMesh" bar chart.
//!
//! The pipeline is `data::derive` -> `charts::render` -> `charts::export`,
//! run once per invocation over the embedded [`data::LIBMESH_CITATIONS`] table.

pub mod charts;
pub mod cli;
pub mod data;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_EXPORT_ERROR: i32 = 1;
pub const EXIT_TABLE_ERROR: i32 = 2;
