//! End-to-end extraction tests over generated register workbooks.

use rust_xlsxwriter::{Workbook, XlsxError};
use unicourse::{extract_bytes, extract_bytes_with, Error, ExtractOptions};

/// Fixture builders for register workbooks.
mod fixtures {
    use super::*;
    use std::io::{Cursor, Write};

    /// Build a workbook in the canonical register layout: columns B..E hold
    /// provider code, institution name, course code and course name; row 0
    /// carries the single "Courses" header cell, row 1 the secondary header
    /// row, data starts at row 2.
    pub fn canonical_register(
        rows: &[(&str, &str, &str, &str)],
    ) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 1, "Courses")?;

        worksheet.write_string(1, 1, "Provider Code")?;
        worksheet.write_string(1, 2, "Institution Name")?;
        worksheet.write_string(1, 3, "CRICOS Course Code")?;
        worksheet.write_string(1, 4, "Course Name")?;

        for (i, (provider, institution, code, name)) in rows.iter().enumerate() {
            let r = (i + 2) as u32;
            if !provider.is_empty() {
                worksheet.write_string(r, 1, *provider)?;
            }
            if !institution.is_empty() {
                worksheet.write_string(r, 2, *institution)?;
            }
            if !code.is_empty() {
                worksheet.write_string(r, 3, *code)?;
            }
            if !name.is_empty() {
                worksheet.write_string(r, 4, *name)?;
            }
        }

        workbook.save_to_buffer()
    }

    /// A register whose provider codes are numeric cells.
    pub fn numeric_provider_register() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 1, "Courses")?;
        worksheet.write_string(1, 1, "Provider Code")?;

        worksheet.write_number(2, 1, 10254.0)?;
        worksheet.write_string(2, 2, "Acme Uni")?;
        worksheet.write_string(2, 3, "CS101")?;
        worksheet.write_string(2, 4, "Intro CS")?;

        workbook.save_to_buffer()
    }

    /// A structurally valid package whose workbook declares zero sheets.
    pub fn zero_sheet_package() -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#,
        )
        .unwrap();

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheets/>
</workbook>"#,
        )
        .unwrap();

        zip.finish().unwrap().into_inner()
    }
}

#[test]
fn canonical_register_groups_by_institution() {
    // Scenario C from the register's documented behavior.
    let data = fixtures::canonical_register(&[
        ("00123", "Acme Uni", "CS101", "Intro CS"),
        ("00123", "Acme Uni", "CS102", "Data Structures"),
    ])
    .unwrap();

    let groups = extract_bytes(data).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].institution_name, "Acme Uni (00123)");
    assert_eq!(
        groups[0].courses,
        vec!["Intro CS (CS101)", "Data Structures (CS102)"]
    );
}

#[test]
fn header_rows_never_appear_in_output() {
    let data = fixtures::canonical_register(&[("00123", "Acme Uni", "CS101", "Intro CS")]).unwrap();
    let groups = extract_bytes(data).unwrap();

    for group in &groups {
        assert!(!group.institution_name.contains("Institution Name"));
        for course in &group.courses {
            assert!(!course.contains("Course Name"));
        }
    }
}

#[test]
fn sheet_with_only_header_rows_yields_empty_list() {
    // Scenario B: no data rows is the "no data" outcome, not an error.
    let data = fixtures::canonical_register(&[]).unwrap();
    let groups = extract_bytes(data).unwrap();
    assert!(groups.is_empty());
}

#[test]
fn rows_missing_course_name_are_dropped() {
    // Scenario D.
    let data = fixtures::canonical_register(&[
        ("00123", "Acme Uni", "CS101", ""),
        ("00123", "Acme Uni", "CS102", ""),
    ])
    .unwrap();
    let groups = extract_bytes(data).unwrap();
    assert!(groups.is_empty());
}

#[test]
fn rows_missing_institution_are_dropped() {
    let data = fixtures::canonical_register(&[
        ("00123", "", "CS101", "Intro CS"),
        ("00200", "Beta College", "B1", "Basics"),
    ])
    .unwrap();
    let groups = extract_bytes(data).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].institution_name, "Beta College (00200)");
}

#[test]
fn groups_keep_first_seen_order_and_row_order() {
    let data = fixtures::canonical_register(&[
        ("00200", "Beta College", "B1", "Basics"),
        ("00100", "Acme Uni", "A1", "Algebra"),
        ("00200", "Beta College", "B2", "Biology"),
        ("00300", "Gamma Institute", "G1", "Geology"),
    ])
    .unwrap();
    let groups = extract_bytes(data).unwrap();

    let names: Vec<&str> = groups.iter().map(|g| g.institution_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Beta College (00200)",
            "Acme Uni (00100)",
            "Gamma Institute (00300)"
        ]
    );
    assert_eq!(groups[0].courses, vec!["Basics (B1)", "Biology (B2)"]);
}

#[test]
fn extraction_is_idempotent() {
    let data = fixtures::canonical_register(&[
        ("00200", "Beta College", "B1", "Basics"),
        ("00100", "Acme Uni", "A1", "Algebra"),
    ])
    .unwrap();

    let first = extract_bytes(data.clone()).unwrap();
    let second = extract_bytes(data).unwrap();
    assert_eq!(first, second);
}

#[test]
fn numeric_provider_codes_coerce_to_strings() {
    let data = fixtures::numeric_provider_register().unwrap();
    let groups = extract_bytes(data).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].institution_name, "Acme Uni (10254)");
}

#[test]
fn zero_sheet_workbook_fails_atomically() {
    // Scenario A.
    let err = extract_bytes(fixtures::zero_sheet_package()).unwrap_err();
    assert!(matches!(err, Error::EmptyWorkbook));
}

#[test]
fn non_workbook_buffer_fails_with_parse_error() {
    let err = extract_bytes(b"definitely not a spreadsheet".to_vec()).unwrap_err();
    assert!(matches!(err, Error::ZipArchive(_)));
}

#[test]
fn header_row_count_is_configurable() {
    let data = fixtures::canonical_register(&[("00123", "Acme Uni", "CS101", "Intro CS")]).unwrap();

    // Skipping three rows swallows the only data row.
    let options = ExtractOptions::new().with_header_rows(3);
    let groups = extract_bytes_with(data, &options).unwrap();
    assert!(groups.is_empty());
}

#[test]
fn extract_path_reads_from_disk() {
    let data = fixtures::canonical_register(&[("00123", "Acme Uni", "CS101", "Intro CS")]).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("register.xlsx");
    std::fs::write(&path, data).unwrap();

    let groups = unicourse::extract_path(&path).unwrap();
    assert_eq!(groups[0].institution_name, "Acme Uni (00123)");
}
