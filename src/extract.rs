//! The tabular data extractor.
//!
//! Turns a parsed [`Workbook`] into an ordered list of [`InstitutionGroup`]
//! records: one worksheet, a fixed column layout, the first rows skipped as
//! headers, and surviving rows aggregated by composite institution name.
//!
//! Column keys follow the register's historical scheme: relative to the
//! declared range's column span, the first column is keyed by the literal
//! `"Courses"` and every later column gets a synthetic `"__EMPTY"`-series
//! key. Header text is decoded and logged but does not drive the default
//! mapping; use [`ColumnMap::ByHeader`] to opt into validated header-driven
//! resolution instead.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::model::{InstitutionGroup, Workbook, Worksheet};

/// Number of leading projected rows discarded as header/title rows.
pub const DEFAULT_HEADER_ROWS: usize = 2;

/// Fixed key for the first column of the declared span.
pub const PROVIDER_CODE_KEY: &str = "Courses";

const SYNTHETIC_PREFIX: &str = "__EMPTY";

/// Key assigned to a column by its offset within the declared span.
///
/// Offset 0 gets the fixed literal, offset 1 the bare synthetic prefix, and
/// offset `n` the prefix with suffix `n - 1`, matching the key sequence the
/// register's consumers have always seen.
pub fn column_key(offset: u32) -> String {
    match offset {
        0 => PROVIDER_CODE_KEY.to_string(),
        1 => SYNTHETIC_PREFIX.to_string(),
        n => format!("{}_{}", SYNTHETIC_PREFIX, n - 1),
    }
}

/// How role columns are located in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnMap {
    /// Positional mapping via the synthetic key scheme. The register's
    /// documented behavior; silently wrong if columns are ever reordered.
    #[default]
    Positional,

    /// Resolve each role by exact header-row text and fail with
    /// [`Error::ColumnNotFound`] when a header is missing.
    ByHeader {
        /// Header text of the provider code column
        provider_code: String,
        /// Header text of the institution name column
        institution: String,
        /// Header text of the course code column
        course_code: String,
        /// Header text of the course name column
        course_name: String,
    },
}

/// Extraction configuration.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Worksheet to read (0-based, default 0)
    pub sheet_index: usize,
    /// Leading projected rows discarded unconditionally (default 2)
    pub header_rows: usize,
    /// Role column resolution (default positional)
    pub columns: ColumnMap,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            sheet_index: 0,
            header_rows: DEFAULT_HEADER_ROWS,
            columns: ColumnMap::default(),
        }
    }
}

impl ExtractOptions {
    /// Create options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a different worksheet.
    pub fn with_sheet_index(mut self, index: usize) -> Self {
        self.sheet_index = index;
        self
    }

    /// Override the number of discarded header rows.
    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    /// Override the role column resolution.
    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }
}

/// A projected data row: every column of the declared span keyed by its
/// column key, absent cells coerced to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    fields: BTreeMap<String, String>,
}

impl RowRecord {
    /// Field value for a column key; empty string for unknown keys.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(|s| s.as_str()).unwrap_or("")
    }

    /// Iterate the (key, value) fields of the record.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Synthetic keys of the four role columns after resolution.
#[derive(Debug, Clone)]
struct RoleKeys {
    provider_code: String,
    institution: String,
    course_code: String,
    course_name: String,
}

impl RoleKeys {
    fn positional() -> Self {
        Self {
            provider_code: column_key(0),
            institution: column_key(1),
            course_code: column_key(2),
            course_name: column_key(3),
        }
    }

    fn by_header(headers: &[String], columns: &ColumnMap) -> Result<Self> {
        let ColumnMap::ByHeader {
            provider_code,
            institution,
            course_code,
            course_name,
        } = columns
        else {
            return Ok(Self::positional());
        };

        let locate = |name: &str| -> Result<String> {
            headers
                .iter()
                .position(|h| h == name)
                .map(|offset| column_key(offset as u32))
                .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
        };

        Ok(Self {
            provider_code: locate(provider_code)?,
            institution: locate(institution)?,
            course_code: locate(course_code)?,
            course_name: locate(course_name)?,
        })
    }
}

/// Extract institution groups from a parsed workbook.
///
/// Runs the whole pipeline: select the worksheet, decode the declared range
/// (single-cell fallback when the sheet declared none), project every row of
/// the range, discard the leading header rows, drop rows missing an
/// institution or course name, and group the rest by composite institution
/// name in first-seen order with courses in row order.
pub fn extract_groups(
    workbook: &Workbook,
    options: &ExtractOptions,
) -> Result<Vec<InstitutionGroup>> {
    if workbook.sheets.is_empty() {
        return Err(Error::EmptyWorkbook);
    }
    let sheet = workbook
        .sheets
        .get(options.sheet_index)
        .ok_or(Error::SheetNotFound(options.sheet_index))?;

    let range = sheet.declared_range();
    log::debug!("sheet {:?}: declared range {}", sheet.name, range);

    // Header row 0 across the column span. Decoded for tracing; only the
    // ByHeader map actually consumes it.
    let headers: Vec<String> = range
        .cols()
        .map(|col| sheet.cell(0, col).unwrap_or("").to_string())
        .collect();
    log::debug!("header row: {:?}", headers);

    let roles = RoleKeys::by_header(&headers, &options.columns)?;

    let records = range.rows().map(|row| project_row(sheet, row, &range));

    let mut groups: Vec<InstitutionGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (nth, record) in records.enumerate().skip(options.header_rows) {
        let institution = record.get(&roles.institution);
        let course_name = record.get(&roles.course_name);

        if institution.is_empty() || course_name.is_empty() {
            log::trace!("row {}: skipped, missing institution or course name", nth);
            continue;
        }

        let provider_code = record.get(&roles.provider_code);
        let course_code = record.get(&roles.course_code);

        let full_name = format!("{} ({})", institution, provider_code);
        let course = format!("{} ({})", course_name, course_code);
        log::trace!("row {}: {} -> {}", nth, full_name, course);

        match index.get(&full_name) {
            Some(&at) => groups[at].courses.push(course),
            None => {
                index.insert(full_name.clone(), groups.len());
                groups.push(InstitutionGroup {
                    institution_name: full_name,
                    courses: vec![course],
                });
            }
        }
    }

    log::debug!("extracted {} institution groups", groups.len());
    Ok(groups)
}

/// Project one row of the declared range into a [`RowRecord`].
fn project_row(sheet: &Worksheet, row: u32, range: &crate::model::CellRange) -> RowRecord {
    let mut fields = BTreeMap::new();
    for (offset, col) in range.cols().enumerate() {
        let value = sheet.cell(row, col).unwrap_or("").to_string();
        fields.insert(column_key(offset as u32), value);
    }
    RowRecord { fields }
}
