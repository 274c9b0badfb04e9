//! Register workbook parsing.
//!
//! This module parses XLSX workbooks into the sparse [`crate::model::Workbook`]
//! grid model: the sheet list from `xl/workbook.xml`, shared strings, and each
//! worksheet's cells positioned by their declared references along with the
//! sheet's declared occupied range.
//!
//! # Example
//!
//! ```no_run
//! use unicourse::workbook::WorkbookParser;
//!
//! let parser = WorkbookParser::open("register.xlsx")?;
//! let workbook = parser.parse()?;
//!
//! for sheet in &workbook.sheets {
//!     println!("Sheet: {} ({} cells)", sheet.name, sheet.cells.len());
//! }
//! # Ok::<(), unicourse::Error>(())
//! ```

mod parser;
mod shared_strings;

pub use parser::WorkbookParser;
pub use shared_strings::SharedStrings;
