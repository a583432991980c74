//! Data Processor Module
//! Splits the flattened year table into plot-ready arrays.

use super::table::{Cell, MalformedTableError, YearCount};
use std::collections::HashSet;

/// Plot-ready view of a [`YearCount`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub total: u64,
    /// Categorical x positions, `1..=N`.
    pub positions: Vec<u32>,
}

impl ChartSpec {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest single-year count, 0 for an empty table.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Validates the table and derives labels, counts, positions and total.
pub fn derive(table: YearCount<'_>) -> Result<ChartSpec, MalformedTableError> {
    let cells = table.cells();
    if cells.len() % 2 != 0 {
        return Err(MalformedTableError::OddLength { len: cells.len() });
    }

    let n = cells.len() / 2;
    let mut labels = Vec::with_capacity(n);
    let mut counts = Vec::with_capacity(n);
    let mut seen = HashSet::with_capacity(n);

    for (pair_idx, pair) in cells.chunks_exact(2).enumerate() {
        let label_idx = pair_idx * 2;
        let label = match pair[0] {
            Cell::Label(label) => label,
            Cell::Count(_) => return Err(MalformedTableError::InvalidLabel { index: label_idx }),
        };
        let count = match pair[1] {
            Cell::Count(count) => u64::try_from(count).map_err(|_| {
                MalformedTableError::InvalidCount {
                    index: label_idx + 1,
                    found: count.to_string(),
                }
            })?,
            Cell::Label(text) => {
                return Err(MalformedTableError::InvalidCount {
                    index: label_idx + 1,
                    found: format!("{text:?}"),
                })
            }
        };
        if !seen.insert(label) {
            return Err(MalformedTableError::DuplicateLabel {
                label: label.to_string(),
            });
        }
        labels.push(label.to_string());
        counts.push(count);
    }

    let positions = (1..=n as u32).collect();
    let total = counts
        .iter()
        .try_fold(0u64, |acc, &count| acc.checked_add(count))
        .ok_or(MalformedTableError::TotalOverflow)?;
    tracing::debug!(entries = n, total, "derived chart spec");

    Ok(ChartSpec {
        labels,
        counts,
        total,
        positions,
    })
}
