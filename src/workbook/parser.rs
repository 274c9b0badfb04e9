//! Workbook parser implementation.

use crate::container::WorkbookContainer;
use crate::error::{Error, Result};
use crate::model::{CellRange, CellRef, Workbook, Worksheet};
use std::collections::HashMap;
use std::path::Path;

use super::shared_strings::SharedStrings;

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    rel_id: String,
}

/// Parser for register workbooks in the XLSX format.
pub struct WorkbookParser {
    container: WorkbookContainer,
    shared_strings: SharedStrings,
    sheets: Vec<SheetInfo>,
    relationships: HashMap<String, String>,
}

impl WorkbookParser {
    /// Open a workbook file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = WorkbookContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a parser from raw workbook bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = WorkbookContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a parser from an opened container.
    pub fn from_container(container: WorkbookContainer) -> Result<Self> {
        let shared_strings = if let Ok(xml) = container.read_xml("xl/sharedStrings.xml") {
            SharedStrings::parse(&xml)?
        } else {
            SharedStrings::default()
        };

        let relationships = Self::parse_workbook_rels(&container)?;
        let sheets = Self::parse_workbook(&container)?;

        Ok(Self {
            container,
            shared_strings,
            sheets,
            relationships,
        })
    }

    /// Parse workbook relationships into an id → target map.
    fn parse_workbook_rels(container: &WorkbookContainer) -> Result<HashMap<String, String>> {
        let mut rels = HashMap::new();

        if let Ok(xml) = container.read_xml("xl/_rels/workbook.xml.rels") {
            let mut reader = quick_xml::Reader::from_str(&xml);
            reader.config_mut().trim_text(true);

            let mut buf = Vec::new();
            loop {
                match reader.read_event_into(&mut buf) {
                    Ok(quick_xml::events::Event::Empty(e))
                    | Ok(quick_xml::events::Event::Start(e)) => {
                        if e.name().as_ref() == b"Relationship" {
                            let mut id = String::new();
                            let mut target = String::new();

                            for attr in e.attributes().flatten() {
                                match attr.key.as_ref() {
                                    b"Id" => {
                                        id = String::from_utf8_lossy(&attr.value).to_string();
                                    }
                                    b"Target" => {
                                        target = String::from_utf8_lossy(&attr.value).to_string();
                                    }
                                    _ => {}
                                }
                            }

                            if !id.is_empty() && !target.is_empty() {
                                rels.insert(id, target);
                            }
                        }
                    }
                    Ok(quick_xml::events::Event::Eof) => break,
                    Err(e) => return Err(Error::XmlParse(e.to_string())),
                    _ => {}
                }
                buf.clear();
            }
        }

        Ok(rels)
    }

    /// Parse workbook.xml for the sheet list, in workbook order.
    fn parse_workbook(container: &WorkbookContainer) -> Result<Vec<SheetInfo>> {
        let mut sheets = Vec::new();
        let xml = container.read_xml("xl/workbook.xml")?;

        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e))
                | Ok(quick_xml::events::Event::Start(e)) => {
                    if e.name().as_ref() == b"sheet" {
                        let mut name = String::new();
                        let mut rel_id = String::new();

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"name" => {
                                    name = String::from_utf8_lossy(&attr.value).to_string();
                                }
                                b"r:id" => {
                                    rel_id = String::from_utf8_lossy(&attr.value).to_string();
                                }
                                _ => {}
                            }
                        }

                        if !name.is_empty() {
                            sheets.push(SheetInfo { name, rel_id });
                        }
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Parse the whole workbook into the [`Workbook`] model.
    pub fn parse(&self) -> Result<Workbook> {
        let mut workbook = Workbook::default();
        log::debug!("workbook sheets: {:?}", self.sheet_names());

        for sheet in &self.sheets {
            let Some(target) = self.relationships.get(&sheet.rel_id) else {
                log::warn!("sheet {:?} has no relationship target, skipping", sheet.name);
                continue;
            };
            let sheet_path = match target.strip_prefix('/') {
                Some(absolute) => absolute.to_string(),
                None => format!("xl/{}", target),
            };

            let xml = self.container.read_xml(&sheet_path)?;
            let mut worksheet = parse_sheet_xml(&xml, &self.shared_strings)?;
            worksheet.name = sheet.name.clone();
            workbook.sheets.push(worksheet);
        }

        Ok(workbook)
    }

    /// Number of sheets declared in the workbook.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Parse a worksheet XML part into a [`Worksheet`].
///
/// Cells are positioned by their `r` attribute; a cell without one lands
/// right of the previous cell in its row. Only cells that produce a value
/// are stored; the grid stays sparse.
pub(crate) fn parse_sheet_xml(xml: &str, shared: &SharedStrings) -> Result<Worksheet> {
    let mut sheet = Worksheet::default();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_row = false;
    let mut in_cell = false;
    let mut in_value = false;
    let mut current_row: u32 = 0;
    let mut next_col: u32 = 0;
    let mut cell_pos = CellRef::new(0, 0);
    let mut cell_type: Option<String> = None;
    let mut cell_value = String::new();
    let mut row_seen = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(ref e))
            | Ok(quick_xml::events::Event::Empty(ref e)) => {
                match e.name().as_ref() {
                    b"dimension" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"ref" {
                                let ref_str = String::from_utf8_lossy(&attr.value);
                                sheet.dimension = parse_range(&ref_str);
                            }
                        }
                    }
                    b"row" => {
                        in_row = true;
                        let mut row_idx = if row_seen { current_row + 1 } else { 0 };
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"r" {
                                if let Ok(r) = String::from_utf8_lossy(&attr.value).parse::<u32>() {
                                    row_idx = r.saturating_sub(1);
                                }
                            }
                        }
                        current_row = row_idx;
                        next_col = 0;
                        row_seen = true;
                    }
                    b"c" if in_row => {
                        in_cell = true;
                        in_value = false;
                        cell_type = None;
                        cell_value.clear();
                        cell_pos = CellRef::new(current_row, next_col);

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => {
                                    let ref_str = String::from_utf8_lossy(&attr.value);
                                    if let Some((row, col)) = parse_cell_ref(&ref_str) {
                                        cell_pos = CellRef::new(row, col);
                                    }
                                }
                                b"t" => {
                                    cell_type =
                                        Some(String::from_utf8_lossy(&attr.value).to_string());
                                }
                                _ => {}
                            }
                        }
                        next_col = cell_pos.col + 1;
                    }
                    b"v" if in_cell => {
                        in_value = true;
                    }
                    b"t" if in_cell => {
                        // Inline string text
                        in_value = true;
                    }
                    _ => {}
                }
            }
            Ok(quick_xml::events::Event::Text(ref e)) => {
                if in_value {
                    let text = e.unescape().unwrap_or_default();
                    cell_value.push_str(&text);
                }
            }
            Ok(quick_xml::events::Event::End(ref e)) => match e.name().as_ref() {
                b"row" => {
                    in_row = false;
                }
                b"c" => {
                    let value = resolve_cell_value(&cell_value, cell_type.as_deref(), shared);
                    if !value.is_empty() {
                        sheet.cells.insert((cell_pos.row, cell_pos.col), value);
                    }
                    in_cell = false;
                }
                b"v" | b"t" => {
                    in_value = false;
                }
                _ => {}
            },
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}

/// Resolve a raw cell value based on its `t` attribute.
fn resolve_cell_value(value: &str, cell_type: Option<&str>, shared: &SharedStrings) -> String {
    match cell_type {
        Some("s") => {
            // Shared string index
            if let Ok(idx) = value.parse::<usize>() {
                shared.get(idx).unwrap_or("").to_string()
            } else {
                value.to_string()
            }
        }
        Some("b") => {
            // Boolean
            if value == "1" {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Some("e") => {
            // Error
            format!("#ERROR:{}", value)
        }
        Some("str") | Some("inlineStr") => value.to_string(),
        _ => {
            // Number or general; kept as the raw value text
            value.to_string()
        }
    }
}

/// Decode an A1-style cell reference to zero-based (row, col).
pub(crate) fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let mut col = 0u32;
    let mut row_str = String::new();

    for ch in cell_ref.chars() {
        if ch.is_ascii_alphabetic() {
            col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        } else if ch.is_ascii_digit() {
            row_str.push(ch);
        } else {
            return None;
        }
    }

    if row_str.is_empty() || col == 0 {
        return None;
    }

    let row = row_str.parse::<u32>().ok()?;
    Some((row.saturating_sub(1), col.saturating_sub(1)))
}

/// Decode an A1-style range (`"B1:E40"`) or single reference (`"A1"`).
pub(crate) fn parse_range(ref_str: &str) -> Option<CellRange> {
    match ref_str.split_once(':') {
        Some((start, end)) => {
            let (sr, sc) = parse_cell_ref(start)?;
            let (er, ec) = parse_cell_ref(end)?;
            Some(CellRange::new(CellRef::new(sr, sc), CellRef::new(er, ec)))
        }
        None => {
            let (row, col) = parse_cell_ref(ref_str)?;
            Some(CellRange::single(CellRef::new(row, col)))
        }
    }
}
