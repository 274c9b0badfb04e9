//! Markdown renderer implementation.

use crate::model::InstitutionGroup;

use super::NO_DATA_GUIDANCE;

/// Convert institution groups to a Markdown listing.
///
/// One second-level heading per institution in extraction order, with its
/// course count and a bulleted course list in row order.
pub fn to_markdown(groups: &[InstitutionGroup]) -> String {
    if groups.is_empty() {
        return format!("{}\n", NO_DATA_GUIDANCE);
    }

    let mut output = String::new();
    output.push_str("# Institutions\n\n");
    output.push_str(&format!("Total institutions: {}\n", groups.len()));

    for group in groups {
        output.push('\n');
        output.push_str(&format!("## {}\n\n", group.institution_name));
        output.push_str(&format!("{} course(s):\n\n", group.courses.len()));
        for course in &group.courses {
            output.push_str(&format!("- {}\n", course));
        }
    }

    output
}
