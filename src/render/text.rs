//! Plain text renderer implementation.

use unicode_width::UnicodeWidthStr;

use crate::model::InstitutionGroup;

use super::NO_DATA_GUIDANCE;

/// Convert institution groups to an aligned plain-text listing.
///
/// Institution names are padded to a common display width so the course
/// counts line up in one column; course entries follow indented, in row
/// order.
pub fn to_text(groups: &[InstitutionGroup]) -> String {
    if groups.is_empty() {
        return format!("{}\n", NO_DATA_GUIDANCE);
    }

    let name_width = groups
        .iter()
        .map(|g| g.institution_name.width())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    output.push_str(&format!("{} institution(s)\n", groups.len()));

    for group in groups {
        let pad = name_width.saturating_sub(group.institution_name.width());
        output.push('\n');
        output.push_str(&format!(
            "{}{}  {} course(s)\n",
            group.institution_name,
            " ".repeat(pad),
            group.courses.len()
        ));
        for course in &group.courses {
            output.push_str(&format!("  {}\n", course));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_listing_aligns_counts() {
        let groups = vec![
            InstitutionGroup {
                institution_name: "Acme Uni (00123)".to_string(),
                courses: vec!["Intro CS (CS101)".to_string()],
            },
            InstitutionGroup {
                institution_name: "A Much Longer Institution Name (00999)".to_string(),
                courses: vec!["Basics (B1)".to_string()],
            },
        ];
        let text = to_text(&groups);

        assert!(text.starts_with("2 institution(s)\n"));
        assert!(text.contains("  Intro CS (CS101)\n"));

        // Both count columns start at the same offset.
        let lines: Vec<&str> = text
            .lines()
            .filter(|l| l.contains("course(s)"))
            .collect();
        assert_eq!(lines.len(), 2);
        let col0 = lines[0].find("1 course(s)").unwrap();
        let col1 = lines[1].find("1 course(s)").unwrap();
        assert_eq!(col0, col1);
    }

    #[test]
    fn test_empty_renders_guidance() {
        let text = to_text(&[]);
        assert!(text.contains("No course data found"));
    }
}
