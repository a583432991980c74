//! Charts module - Chart rendering and export

mod export;
mod figure;
mod pdf;
mod raster;

pub use export::{export, ExportError, ExportTarget};
pub use figure::{render, Axes, Bar, Figure, Rgb, Tick};
