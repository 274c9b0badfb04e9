//! Shared strings table parsing.

use crate::error::{Error, Result};

/// Shared strings table from `xl/sharedStrings.xml`.
///
/// Rich-text runs inside a single `<si>` entry are concatenated, so a cell
/// always resolves to one flat string.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    /// All strings in table order
    strings: Vec<String>,
}

impl SharedStrings {
    /// Parse shared strings from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut current_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_text.clear();
                    }
                    b"t" if in_si => {
                        in_t = true;
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Text(e)) => {
                    if in_t {
                        let text = e.unescape().unwrap_or_default();
                        current_text.push_str(&text);
                    }
                }
                Ok(quick_xml::events::Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(current_text.clone());
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let xml = r#"<?xml version="1.0"?>
            <sst count="3" uniqueCount="3">
              <si><t>Courses</t></si>
              <si><t>Acme Uni</t></si>
              <si><t>Intro CS</t></si>
            </sst>"#;
        let strings = SharedStrings::parse(xml).unwrap();
        assert_eq!(strings.len(), 3);
        assert_eq!(strings.get(0), Some("Courses"));
        assert_eq!(strings.get(2), Some("Intro CS"));
        assert_eq!(strings.get(3), None);
    }

    #[test]
    fn test_parse_rich_text_runs() {
        let xml = r#"<sst><si><r><t>CS</t></r><r><t>101</t></r></si></sst>"#;
        let strings = SharedStrings::parse(xml).unwrap();
        assert_eq!(strings.get(0), Some("CS101"));
    }

    #[test]
    fn test_parse_empty_table() {
        let strings = SharedStrings::parse("<sst/>").unwrap();
        assert!(strings.is_empty());
    }
}
