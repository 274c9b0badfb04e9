//! Error types for the unicourse library.

use std::io;
use thiserror::Error;

/// Result type alias for unicourse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching or extracting a register workbook.
///
/// Transport and format failures are fatal for the whole operation; rows with
/// missing fields are excluded silently and never surface here, and an empty
/// result is an empty `Vec`, not an error.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The workbook resource came back with a non-success HTTP status.
    #[error("fetch failed with HTTP status {status} for {url}")]
    Fetch {
        /// HTTP status code of the response
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// The workbook resource could not be retrieved at all.
    #[error("transport error: {0}")]
    Transport(String),

    /// Error reading the ZIP archive that holds the workbook.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content inside the workbook.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required workbook part is missing from the archive.
    #[error("missing workbook part: {0}")]
    MissingComponent(String),

    /// The workbook parsed but contains no worksheets.
    #[error("workbook contains no worksheets")]
    EmptyWorkbook,

    /// The configured worksheet index is out of range.
    #[error("worksheet index {0} not found in workbook")]
    SheetNotFound(usize),

    /// A header-mapped column was not found in the header row.
    #[error("column not found in header row: {0:?}")]
    ColumnNotFound(String),

    /// Error during rendering.
    #[error("render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyWorkbook;
        assert_eq!(err.to_string(), "workbook contains no worksheets");

        let err = Error::SheetNotFound(3);
        assert_eq!(err.to_string(), "worksheet index 3 not found in workbook");
    }

    #[test]
    fn test_fetch_error_contains_status() {
        let err = Error::Fetch {
            status: 404,
            url: "http://example.com/register.xlsx".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("register.xlsx"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
