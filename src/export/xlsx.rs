// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::cell_value::{CellValue, classify};
use crate::export::model::{ReportTable, ShiftReport};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet,
};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Shift report workbook: a Summary sheet followed by one sheet per table.
pub(crate) fn export_shift_xlsx(report: &ShiftReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    let mut summary: Vec<(String, String)> = Vec::new();
    if !report.company.is_empty() {
        summary.push(("Company".to_string(), report.company.clone()));
    }
    summary.extend(report.info.iter().cloned());
    summary.extend(report.notes.iter().cloned());

    let summary_table = ReportTable {
        name: "Summary".to_string(),
        headers: vec!["Field", "Value"],
        rows: summary.into_iter().map(|(k, v)| vec![k, v]).collect(),
    };

    write_table_sheet(&mut workbook, &summary_table)?;
    for table in report.tables() {
        write_table_sheet(&mut workbook, table)?;
    }

    workbook.save(path_str(path)?).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Single-sheet workbook for one table (operator and ITH reports).
pub(crate) fn export_table_xlsx(table: &ReportTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    write_table_sheet(&mut workbook, table)?;
    workbook.save(path_str(path)?).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Sheet names are limited to 31 chars and may not contain `[]:*?/\`.
fn sheet_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect()
}

fn write_table_sheet(workbook: &mut Workbook, table: &ReportTable) -> AppResult<()> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name(&table.name))
        .map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    if table.rows.is_empty() {
        worksheet
            .write(1, 0, "No data available")
            .map_err(to_export_error)?;
    }

    let mut col_widths: Vec<usize> = table
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, values) in table.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate() {
            write_xlsx_cell(worksheet, row, col as u16, value, band_color)?;

            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w).min(60) as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    Ok(())
}

/// Writes one cell, typed by [`classify`].
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    let written = match classify(s) {
        CellValue::Serial(serial, num_format) => {
            let fmt = base.set_num_format(num_format);
            worksheet.write_with_format(row, col, serial, &fmt)
        }
        CellValue::Number(num) => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet.write_with_format(row, col, num, &fmt)
        }
        CellValue::Text(text) => worksheet.write_with_format(row, col, text, &base),
    };
    written.map_err(to_export_error)?;

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX: {e}"))
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::Export(format!("invalid path: {}", path.display())))
}
