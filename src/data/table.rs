//! Year Table Module
//! The flattened year-label / publication-count table that drives the chart.
//!
//! Counts are papers whose authors actually used libMesh, not raw citations.
//! Theses and dissertations are counted separately and are not included here.
//! The table is regenerated from the bibliography with
//! `./create_website.sh -c` in `doc/citations` and pasted in by hand.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTableError {
    #[error("table has {len} cells; labels and counts must alternate in pairs")]
    OddLength { len: usize },
    #[error("cell {index} must be a year label")]
    InvalidLabel { index: usize },
    #[error("cell {index} must be a non-negative count, found {found}")]
    InvalidCount { index: usize, found: String },
    #[error("label {label:?} appears more than once")]
    DuplicateLabel { label: String },
    #[error("counts add up to more than {}", u64::MAX)]
    TotalOverflow,
}

/// One element of the flattened table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Label(&'a str),
    Count(i64),
}

/// Alternating label/count cells, oldest year first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount<'a> {
    cells: &'a [Cell<'a>],
}

impl<'a> YearCount<'a> {
    pub const fn new(cells: &'a [Cell<'a>]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &'a [Cell<'a>] {
        self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

use Cell::{Count, Label};

/// Papers by people using libMesh. The libMesh paper came out in 2006; the
/// earlier entries mostly refer to the old libmesh.sf.net site.
#[rustfmt::skip]
pub const LIBMESH_CITATIONS: YearCount<'static> = YearCount::new(&[
    Label("'04"), Count(7),
    Label("'05"), Count(2),
    Label("'06"), Count(15),
    Label("'07"), Count(10),
    Label("'08"), Count(30),
    Label("'09"), Count(31),
    Label("'10"), Count(30),
    Label("'11"), Count(40),
    Label("'12"), Count(57),
    Label("'13"), Count(89),
    Label("'14"), Count(82),
    Label("'15"), Count(109),
    Label("'16"), Count(145),
    Label("'17"), Count(152),
    Label("'18"), Count(159),
    Label("'19"), Count(134),
    Label("'20"), Count(190),
    Label("'21"), Count(215),
    Label("'22"), Count(239),
    Label("'23"), Count(235),
    Label("'24"), Count(243),
    // partial year
    Label("'25"), Count(21),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_alternates_labels_and_counts() {
        let cells = LIBMESH_CITATIONS.cells();
        assert_eq!(cells.len(), 44);
        for pair in cells.chunks(2) {
            assert!(matches!(pair[0], Cell::Label(_)));
            assert!(matches!(pair[1], Cell::Count(n) if n >= 0));
        }
    }

    #[test]
    fn error_messages_name_the_offending_cell() {
        let err = MalformedTableError::InvalidCount {
            index: 3,
            found: "-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cell 3 must be a non-negative count, found -1"
        );
        let err = MalformedTableError::OddLength { len: 3 };
        assert!(err.to_string().contains("3 cells"));
    }
}
