// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{ReportTable, ShiftReport};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::path::Path;

fn save(pdf: PdfManager, path: &Path) -> AppResult<()> {
    tracing::debug!(pages = pdf.page_count(), path = %path.display(), "writing pdf");
    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;
    notify_export_success("PDF", path);
    Ok(())
}

/// Header block, one section per table, closing notes.
pub(crate) fn export_shift_pdf(report: &ShiftReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let mut pdf = PdfManager::new(&report.title, &report.company);
    pdf.key_values(&report.info);

    for table in report.tables() {
        pdf.heading(&table.name);
        pdf.table(&table.headers, &table.rows);
    }

    for (label, text) in &report.notes {
        pdf.heading(label);
        pdf.paragraph(text);
    }

    save(pdf, path)
}

pub(crate) fn export_table_pdf(
    title: &str,
    company: &str,
    table: &ReportTable,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let mut pdf = PdfManager::new(title, company);
    pdf.table(&table.headers, &table.rows);

    save(pdf, path)
}
