// Excel report: one "Comparison" sheet in the shared row layout

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook};

use dbcompare_recon::model::Field;
use dbcompare_recon::ReconResult;

use super::{layout, ReportRow, ReportStyle};
use crate::error::IoError;

pub const SHEET_NAME: &str = "Comparison";

const LABEL_WIDTH: f64 = 14.0;
const FIELD_WIDTH: f64 = 18.0;

pub fn export(result: &ReconResult, path: &Path, style: &ReportStyle) -> Result<(), IoError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    let plain = Format::new();
    let heading = if style.bold_headers { Format::new().set_bold() } else { Format::new() };
    let highlight = Format::new().set_background_color(Color::RGB(style.highlight));

    for (row, entry) in layout(result).iter().enumerate() {
        let row = row as u32;
        match entry {
            ReportRow::Header | ReportRow::Section(_) => {
                for (col, text) in entry.cells().iter().enumerate() {
                    worksheet.write_string_with_format(row, col as u16, text, &heading)?;
                }
            }
            ReportRow::Record { highlight: mask, .. } => {
                let cells = entry.cells();
                worksheet.write_string_with_format(row, 0, &cells[0], &plain)?;
                for (i, field) in Field::ALL.iter().enumerate() {
                    let format = if mask.contains(*field) { &highlight } else { &plain };
                    worksheet.write_string_with_format(row, (i + 1) as u16, &cells[i + 1], format)?;
                }
            }
        }
    }

    worksheet.set_column_width(0, LABEL_WIDTH)?;
    for col in 1..=Field::ALL.len() {
        worksheet.set_column_width(col as u16, FIELD_WIDTH)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    workbook
        .save(path)
        .map_err(|e| IoError::Write(format!("{}: {e}", path.display())))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
