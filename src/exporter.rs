//! Spreadsheet export
//!
//! Writes the collected records to a single `Employees` sheet: one header
//! row, then one 120pt row per record with the photo embedded in column A.

use rust_xlsxwriter::{Format, FormatAlign, Image, ObjectMovement, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::crawl_engine::{ProfileRecord, ScrapeError, ScrapeResult};

pub const SHEET_NAME: &str = "Employees";
pub const HEADERS: [&str; 6] = ["Photo", "Name", "Bio", "Profile URL", "Phone", "Email"];
const COLUMN_WIDTHS: [f64; 6] = [18.0, 25.0, 40.0, 45.0, 30.0, 30.0];
const ROW_HEIGHT: f64 = 120.0;
const IMAGE_SCALE: f64 = 0.45;

/// Write `records` to `path`, replacing any existing file.
///
/// Returns the number of data rows written. A photo whose bytes are not a
/// recognizable image leaves its cell empty; the row is still written.
///
/// # Errors
///
/// `ScrapeError::Export` when the workbook cannot be built or saved.
pub fn export_records(records: &[ProfileRecord], path: &Path) -> ScrapeResult<usize> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    write_sheet(sheet, records).map_err(|e| ScrapeError::Export(e.to_string()))?;

    workbook
        .save(path)
        .map_err(|e| ScrapeError::Export(format!("{}: {e}", path.display())))?;

    info!("Saved {} profiles to {}", records.len(), path.display());
    Ok(records.len())
}

fn write_sheet(sheet: &mut Worksheet, records: &[ProfileRecord]) -> Result<(), XlsxError> {
    sheet.set_name(SHEET_NAME)?;
    sheet.write_row(0, 0, HEADERS)?;

    for (col, width) in (0u16..).zip(COLUMN_WIDTHS) {
        sheet.set_column_width(col, width)?;
    }

    let wrap = Format::new().set_text_wrap().set_align(FormatAlign::Top);

    for (row, record) in (1u32..).zip(records) {
        sheet.set_row_height(row, ROW_HEIGHT)?;

        let cells = [
            record.display_name.as_str(),
            record.headline.as_str(),
            record.profile_url.as_str(),
            record.phones.as_str(),
            record.emails.as_str(),
        ];
        for (col, value) in (1u16..).zip(cells) {
            sheet.write_string_with_format(row, col, value, &wrap)?;
        }

        if let Some(photo) = &record.photo {
            match Image::new_from_buffer(photo) {
                Ok(image) => {
                    let image = image
                        .set_scale_width(IMAGE_SCALE)
                        .set_scale_height(IMAGE_SCALE)
                        .set_object_movement(ObjectMovement::MoveAndSizeWithCells);
                    sheet.insert_image(row, 0, &image)?;
                }
                Err(e) => {
                    warn!(
                        "Photo for {} is not embeddable ({}); row written without it",
                        record.display_name, e
                    );
                }
            }
        } else {
            debug!("No photo for {}", record.display_name);
        }
    }

    Ok(())
}
