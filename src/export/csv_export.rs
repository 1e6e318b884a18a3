// src/export/csv_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::ShiftReport;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::path::Path;

fn csv_error(e: csv::Error) -> AppError {
    AppError::Export(format!("CSV: {e}"))
}

/// Production readings of the shift, one row per reading.
pub(crate) fn export_production_csv(report: &ShiftReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;

    wtr.write_record(&report.readings.headers).map_err(csv_error)?;
    for row in &report.readings.rows {
        wtr.write_record(row).map_err(csv_error)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
