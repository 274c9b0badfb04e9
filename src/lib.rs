//! # unicourse
//!
//! Extract institution and course listings from CRICOS register workbooks.
//!
//! This library parses a register export (XLSX), reads its fixed column
//! layout from the first worksheet, and aggregates the rows into one record
//! per institution carrying that institution's courses in row order. The
//! result can be rendered to JSON, Markdown, or plain text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unicourse::render::to_json_default;
//!
//! // Extract from a local file
//! let groups = unicourse::extract_path("register.xlsx")?;
//! println!("{} institutions", groups.len());
//!
//! // Render to JSON
//! println!("{}", to_json_default(&groups)?);
//! # Ok::<(), unicourse::Error>(())
//! ```
//!
//! With the `fetch` feature (on by default), the workbook can be retrieved
//! from a URL in one blocking call:
//!
//! ```no_run
//! use unicourse::{fetch_groups, ExtractOptions};
//!
//! let groups = fetch_groups(
//!     "https://example.org/aus-uni.xlsx",
//!     &ExtractOptions::default(),
//! )?;
//! # Ok::<(), unicourse::Error>(())
//! ```
//!
//! ## Layout assumptions
//!
//! The register layout is positional: within the declared range of the first
//! worksheet, the columns are provider code, institution name, course code,
//! and course name, with two header rows above the data. Header text is not
//! inspected by default; see [`ColumnMap::ByHeader`] to opt into validated
//! header-driven column resolution, and [`ExtractOptions`] to change the
//! worksheet or header-row count.
//!
//! ## Features
//!
//! - `fetch` (default): blocking HTTP retrieval of the workbook via reqwest

pub mod container;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod workbook;

#[cfg(feature = "fetch")]
pub mod fetch;

// Re-exports
pub use container::WorkbookContainer;
pub use error::{Error, Result};
pub use extract::{extract_groups, column_key, ColumnMap, ExtractOptions, RowRecord};
pub use model::{CellRange, CellRef, InstitutionGroup, Workbook, Worksheet};
pub use workbook::WorkbookParser;

#[cfg(feature = "fetch")]
pub use fetch::{fetch_groups, fetch_workbook_bytes, LoadState};

use std::path::Path;

/// Extract institution groups from a workbook file with default options.
pub fn extract_path(path: impl AsRef<Path>) -> Result<Vec<InstitutionGroup>> {
    extract_path_with(path, &ExtractOptions::default())
}

/// Extract institution groups from a workbook file.
pub fn extract_path_with(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<Vec<InstitutionGroup>> {
    let workbook = WorkbookParser::open(path)?.parse()?;
    extract_groups(&workbook, options)
}

/// Extract institution groups from raw workbook bytes with default options.
pub fn extract_bytes(data: Vec<u8>) -> Result<Vec<InstitutionGroup>> {
    extract_bytes_with(data, &ExtractOptions::default())
}

/// Extract institution groups from raw workbook bytes.
pub fn extract_bytes_with(
    data: Vec<u8>,
    options: &ExtractOptions,
) -> Result<Vec<InstitutionGroup>> {
    let workbook = WorkbookParser::from_bytes(data)?.parse()?;
    extract_groups(&workbook, options)
}
