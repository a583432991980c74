//! Chart Export Module
//! Writes a rendered [`Figure`] to `libmesh_citations.{png,pdf}`.

use crate::charts::figure::Figure;
use crate::charts::pdf::PdfWriter;
use crate::charts::raster::{self, RasterError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Base name of the output file; the extension follows the target.
pub const OUTPUT_STEM: &str = "libmesh_citations";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to rasterize chart: {0}")]
    Raster(#[from] RasterError),
}

/// Output format, chosen once on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Png { dpi: u32 },
    Pdf,
}

impl Default for ExportTarget {
    fn default() -> Self {
        ExportTarget::Pdf
    }
}

impl ExportTarget {
    pub const PNG_DPI: u32 = 200;

    pub fn from_png_flag(png: bool) -> Self {
        if png {
            ExportTarget::Png { dpi: Self::PNG_DPI }
        } else {
            ExportTarget::Pdf
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportTarget::Png { .. } => "png",
            ExportTarget::Pdf => "pdf",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", OUTPUT_STEM, self.extension())
    }
}

/// Encode `figure` for `target` and write it into `dir`.
///
/// The figure is consumed. Bytes go to a hidden sibling file that is renamed
/// into place, so a failed export leaves no output file behind.
pub fn export(figure: Figure, target: ExportTarget, dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = match target {
        ExportTarget::Png { dpi } => raster::render_png(&figure, dpi)?,
        ExportTarget::Pdf => PdfWriter::write_document(&figure),
    };
    drop(figure);

    let path = dir.join(target.file_name());
    write_output(&path, &bytes)?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "chart exported");
    Ok(path)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let tmp = path.with_file_name(format!(
        ".{}.part",
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    ));

    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    result.map_err(|source| {
        let _ = fs::remove_file(&tmp);
        ExportError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}
