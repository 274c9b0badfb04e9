//! ZIP container abstraction for register workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// ZIP container holding the parts of an XLSX workbook.
///
/// Wraps the raw byte buffer and provides part-level access to the XML files
/// that make up the package. A buffer that is not a ZIP archive, or that
/// lacks `xl/workbook.xml`, is rejected up front so that format failures
/// surface before any extraction work starts.
pub struct WorkbookContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl WorkbookContainer {
    /// Open a workbook container from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a workbook container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let cursor = Cursor::new(data);
        let archive = zip::ZipArchive::new(cursor)?;
        let container = Self {
            archive: RefCell::new(archive),
        };
        if !container.exists("xl/workbook.xml") {
            return Err(Error::MissingComponent("xl/workbook.xml".to_string()));
        }
        log::debug!("opened workbook container, {} parts", container.part_names().len());
        Ok(container)
    }

    /// Create a workbook container from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read an XML part from the archive as a string.
    ///
    /// A UTF-8 BOM is stripped; anything else is decoded lossily. Register
    /// workbooks are UTF-8 in practice.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        let body = match bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
            Some(rest) => rest,
            None => &bytes[..],
        };
        Ok(String::from_utf8_lossy(body).into_owned())
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == path);
        found
    }

    /// List all parts in the archive.
    pub fn part_names(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }
}

impl std::fmt::Debug for WorkbookContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookContainer")
            .field("parts", &self.part_names().len())
            .finish()
    }
}
