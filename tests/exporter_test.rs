//! Spreadsheet output read back with calamine

use bytes::Bytes;
use calamine::{Data, Reader, Xlsx, open_workbook};
use roster_scrape::exporter::{HEADERS, SHEET_NAME};
use roster_scrape::{ContactBlock, ProfileRecord, export_records};
use tempfile::TempDir;

mod common;
use common::TINY_PNG;

fn record(name: &str, photo: Option<&'static [u8]>, contact: &ContactBlock) -> ProfileRecord {
    ProfileRecord::new(
        name.to_string(),
        format!("{name} headline"),
        format!("https://www.linkedin.com/in/{}/", name.to_lowercase()),
        photo.map(Bytes::from_static),
        contact,
    )
}

fn cell(row: &[Data], col: usize) -> String {
    row.get(col).map(ToString::to_string).unwrap_or_default()
}

#[test]
fn writes_header_and_rows_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("employees.xlsx");

    let mut contact = ContactBlock::default();
    contact.push_phone("+1 555 0100");
    contact.push_phone("5550101");
    contact.push_email("ada@example.com");

    let records = vec![
        record("Ada", Some(TINY_PNG), &contact),
        record("Grace", None, &ContactBlock::default()),
    ];

    let saved = export_records(&records, &path).unwrap();
    assert_eq!(saved, 2);

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    assert_eq!(workbook.sheet_names(), [SHEET_NAME]);

    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    let rows: Vec<&[Data]> = range.rows().collect();
    assert_eq!(rows.len(), 3);

    let header: Vec<String> = (0..HEADERS.len()).map(|c| cell(rows[0], c)).collect();
    assert_eq!(header, HEADERS);

    assert_eq!(cell(rows[1], 1), "Ada");
    assert_eq!(cell(rows[1], 2), "Ada headline");
    assert_eq!(cell(rows[1], 3), "https://www.linkedin.com/in/ada/");
    assert_eq!(cell(rows[1], 4), "+1 555 0100");
    assert_eq!(cell(rows[1], 5), "ada@example.com");

    assert_eq!(cell(rows[2], 1), "Grace");
    assert_eq!(cell(rows[2], 4), "");
    assert_eq!(cell(rows[2], 5), "");

    let pictures = workbook.pictures().unwrap_or_default();
    assert_eq!(pictures.len(), 1, "only the record with a photo embeds one");
}

#[test]
fn unembeddable_photo_still_writes_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xlsx");

    let records = vec![record(
        "Linus",
        Some(b"<html>not an image</html>"),
        &ContactBlock::default(),
    )];

    assert_eq!(export_records(&records, &path).unwrap(), 1);

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    let rows: Vec<&[Data]> = range.rows().collect();
    assert_eq!(cell(rows[1], 1), "Linus");
    assert!(workbook.pictures().unwrap_or_default().is_empty());
}

#[test]
fn empty_run_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.xlsx");

    assert_eq!(export_records(&[], &path).unwrap(), 0);

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    assert_eq!(range.rows().count(), 1);
}

#[test]
fn unwritable_path_is_export_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("out.xlsx");

    let err = export_records(&[], &path).unwrap_err();
    assert!(matches!(err, roster_scrape::ScrapeError::Export(_)));
}
