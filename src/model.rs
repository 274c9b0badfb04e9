//! Data model for parsed workbooks and extracted course groups.
//!
//! Parsers produce [`Workbook`]/[`Worksheet`] values; the extractor turns
//! them into [`InstitutionGroup`] records, which are what crosses the output
//! boundary (and therefore carry serde derives with the camelCase names the
//! JSON consumers expect).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Zero-based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellRef {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based)
    pub col: u32,
}

impl CellRef {
    /// Create a new cell reference.
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Rectangular cell range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// Top-left corner
    pub start: CellRef,
    /// Bottom-right corner
    pub end: CellRef,
}

impl CellRange {
    /// Create a range from two corners.
    pub fn new(start: CellRef, end: CellRef) -> Self {
        Self { start, end }
    }

    /// A range covering a single cell.
    pub fn single(cell: CellRef) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    /// Iterate the row indices of the range.
    pub fn rows(&self) -> impl Iterator<Item = u32> {
        self.start.row..=self.end.row
    }

    /// Iterate the column indices of the range.
    pub fn cols(&self) -> impl Iterator<Item = u32> {
        self.start.col..=self.end.col
    }

    /// Number of rows in the range.
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Number of columns in the range.
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }
}

impl std::fmt::Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "R{}C{}:R{}C{}",
            self.start.row + 1,
            self.start.col + 1,
            self.end.row + 1,
            self.end.col + 1
        )
    }
}

/// A single worksheet: a sparse grid of string cells plus the declared
/// occupied range from the sheet's `<dimension>` element.
///
/// Cells with no value are absent from the grid, not empty strings; callers
/// that need dense rows coerce absent cells when projecting.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet name as declared in workbook.xml
    pub name: String,
    /// Declared occupied range, if the sheet declared one
    pub dimension: Option<CellRange>,
    /// Occupied cells keyed by (row, col), already coerced to string
    pub cells: BTreeMap<(u32, u32), String>,
}

impl Worksheet {
    /// Look up a cell value by zero-based coordinates.
    pub fn cell(&self, row: u32, col: u32) -> Option<&str> {
        self.cells.get(&(row, col)).map(|s| s.as_str())
    }

    /// The declared occupied range, falling back to a single-cell range at
    /// the origin when the sheet declared none.
    pub fn declared_range(&self) -> CellRange {
        self.dimension
            .unwrap_or_else(|| CellRange::single(CellRef::new(0, 0)))
    }

    /// Largest row/column actually occupied, if any cell is.
    pub fn occupied_extent(&self) -> Option<CellRef> {
        let mut extent: Option<CellRef> = None;
        for &(row, col) in self.cells.keys() {
            let e = extent.get_or_insert(CellRef::new(row, col));
            e.row = e.row.max(row);
            e.col = e.col.max(col);
        }
        extent
    }
}

/// An ordered collection of worksheets.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Worksheets in workbook order
    pub sheets: Vec<Worksheet>,
}

impl Workbook {
    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of worksheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

/// One institution and its courses, in row-encounter order.
///
/// `institution_name` is the composite display key, raw institution name
/// followed by the provider code in parentheses; each course entry is the
/// course name followed by the course code in parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionGroup {
    /// Composite institution display name, e.g. `"Acme Uni (00123)"`
    pub institution_name: String,
    /// Course entries, e.g. `"Intro CS (CS101)"`, in row order
    pub courses: Vec<String>,
}
