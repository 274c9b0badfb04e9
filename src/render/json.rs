//! JSON renderer implementation.

use crate::error::{Error, Result};
use crate::model::InstitutionGroup;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert institution groups to JSON.
pub fn to_json(groups: &[InstitutionGroup], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Compact => serde_json::to_string(groups),
        JsonFormat::Pretty => serde_json::to_string_pretty(groups),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert institution groups to JSON with default formatting.
pub fn to_json_default(groups: &[InstitutionGroup]) -> Result<String> {
    to_json(groups, JsonFormat::Pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<InstitutionGroup> {
        vec![InstitutionGroup {
            institution_name: "Acme Uni (00123)".to_string(),
            courses: vec!["Intro CS (CS101)".to_string()],
        }]
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"institutionName\": \"Acme Uni (00123)\""));
        assert!(json.contains("\"Intro CS (CS101)\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"institutionName\":\"Acme Uni (00123)\""));
    }

    #[test]
    fn test_empty_list_is_valid_json() {
        let json = to_json(&[], JsonFormat::Compact).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_roundtrip() {
        let json = to_json_default(&sample()).unwrap();
        let parsed: Vec<InstitutionGroup> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }
}
