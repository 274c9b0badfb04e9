//! Blocking retrieval of the register workbook.
//!
//! One GET, no retries: a non-success status fails the whole operation with
//! the status code in the message, and nothing downstream runs. Available
//! behind the `fetch` feature (on by default).

use crate::error::{Error, Result};
use crate::extract::{extract_groups, ExtractOptions};
use crate::model::InstitutionGroup;
use crate::workbook::WorkbookParser;

/// Fetch the raw workbook bytes from a URL.
pub fn fetch_workbook_bytes(url: &str) -> Result<Vec<u8>> {
    log::debug!("fetching register workbook from {}", url);
    let response = reqwest::blocking::get(url).map_err(|e| Error::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Fetch {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let bytes = response
        .bytes()
        .map_err(|e| Error::Transport(e.to_string()))?;
    log::debug!("fetched {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

/// Fetch a register workbook and extract its institution groups.
///
/// The fetch-parse-extract sequence runs to completion or fails atomically;
/// there is no partial result and no cancellation point.
pub fn fetch_groups(url: &str, options: &ExtractOptions) -> Result<Vec<InstitutionGroup>> {
    let bytes = fetch_workbook_bytes(url)?;
    let workbook = WorkbookParser::from_bytes(bytes)?.parse()?;
    extract_groups(&workbook, options)
}

/// Observable state of a load operation.
///
/// `Ready` with an empty list is the "no data" outcome, distinct from
/// `Failed`, so consumers can render guidance instead of an error panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// The operation has not completed yet.
    Pending,
    /// The operation succeeded, possibly with an empty list.
    Ready(Vec<InstitutionGroup>),
    /// The operation failed; carries the human-readable message.
    Failed(String),
}

impl LoadState {
    /// Run a load operation to completion and capture its outcome.
    ///
    /// Never returns `Pending`: the underlying operation is blocking and
    /// uncancellable, so the state always resolves to `Ready` or `Failed`.
    pub fn resolve(url: &str, options: &ExtractOptions) -> Self {
        match fetch_groups(url, options) {
            Ok(groups) => LoadState::Ready(groups),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }

    /// True once the operation has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadState::Pending)
    }

    /// The groups, if the operation succeeded.
    pub fn groups(&self) -> Option<&[InstitutionGroup]> {
        match self {
            LoadState::Ready(groups) => Some(groups),
            _ => None,
        }
    }

    /// The failure message, if the operation failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<Result<Vec<InstitutionGroup>>> for LoadState {
    fn from(result: Result<Vec<InstitutionGroup>>) -> Self {
        match result {
            Ok(groups) => LoadState::Ready(groups),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }
}
