//! Output rendering for extracted institution groups.
//!
//! Renderers for the three output formats: JSON, Markdown, and aligned
//! plain text. An empty group list renders as the "no data" guidance block
//! in the human-readable formats, never as an error.
//!
//! # Example
//!
//! ```no_run
//! use unicourse::render::{to_json, to_markdown, to_text, JsonFormat};
//!
//! let groups = unicourse::extract_path("register.xlsx")?;
//!
//! let json = to_json(&groups, JsonFormat::Pretty)?;
//! let md = to_markdown(&groups);
//! let text = to_text(&groups);
//! # Ok::<(), unicourse::Error>(())
//! ```

mod json;
mod markdown;
mod text;

pub use json::{to_json, to_json_default, JsonFormat};
pub use markdown::to_markdown;
pub use text::to_text;

/// Guidance shown instead of a listing when extraction produced no groups.
pub(crate) const NO_DATA_GUIDANCE: &str = "\
No course data found.

Check that:
- the workbook is the expected register export
- the first worksheet holds the provider, institution and course columns
- data rows start below the two header rows";
