// src/export/logic.rs

use crate::core::calculator::reports::{ith_hourly_report, operator_report};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::csv_export::export_production_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::{ith_table, operator_table, operator_title, shift_report};
use crate::export::pdf_export::{export_shift_pdf, export_table_pdf};
use crate::export::xlsx::{export_shift_xlsx, export_table_xlsx};
use crate::models::Millis;
use crate::models::state::AppState;
use crate::ui::messages::warning;
use crate::utils::date::format_date;
use chrono::NaiveDate;
use std::path::Path;

/// Report exports. These only read the document.
pub struct ExportLogic;

impl ExportLogic {
    /// Shift report of the active shift, or of history entry `history`
    /// (1 = most recent closed shift).
    pub fn report_shift(
        state: &AppState,
        history: Option<usize>,
        format: ExportFormat,
        path: &Path,
        force: bool,
        now: Millis,
    ) -> AppResult<()> {
        let (shift, record) = match history {
            Some(n) => {
                let record = n
                    .checked_sub(1)
                    .and_then(|i| state.shift_history.get(i))
                    .ok_or_else(|| AppError::not_found("Shift history entry", n.to_string()))?;
                (&record.shift, Some(record))
            }
            None => (
                state.active_shift.as_ref().ok_or(AppError::NoActiveShift)?,
                None,
            ),
        };

        ensure_writable(path, force)?;

        let report = shift_report(state, shift, record, now);

        match format {
            ExportFormat::Xlsx => export_shift_xlsx(&report, path),
            ExportFormat::Pdf => export_shift_pdf(&report, path),
            ExportFormat::Csv => export_production_csv(&report, path),
            ExportFormat::Json => Err(AppError::Export(
                "shift reports are written as xlsx, pdf or csv; use `export` for JSON".to_string(),
            )),
        }
    }

    pub fn report_operator(
        state: &AppState,
        operator_id: &str,
        date: NaiveDate,
        shift_name: Option<&str>,
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        if state.operator(operator_id).is_none() {
            return Err(AppError::not_found("Operator", operator_id));
        }

        let report = operator_report(state, date, shift_name, operator_id);
        if report.rows.is_empty() {
            warning(format!(
                "No readings found for {} on {}.",
                report.operator_name,
                format_date(date)
            ));
        }

        ensure_writable(path, force)?;

        let table = operator_table(&report);
        let title = operator_title(&report);

        match format {
            ExportFormat::Pdf => {
                export_table_pdf(&title, &state.settings.company_name, &table, path)
            }
            ExportFormat::Xlsx => export_table_xlsx(&table, path),
            other => Err(unsupported(other)),
        }
    }

    pub fn report_ith(
        state: &AppState,
        date: NaiveDate,
        loom_id: Option<&str>,
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        let groups = ith_hourly_report(state, date, loom_id);
        if groups.is_empty() {
            warning(format!("No ITH interventions on {}.", format_date(date)));
        }

        ensure_writable(path, force)?;

        let table = ith_table(&groups);
        let title = match loom_id {
            Some(id) => format!(
                "ITH report {} - {}",
                format_date(date),
                state.loom_code(id)
            ),
            None => format!("ITH report {}", format_date(date)),
        };

        match format {
            ExportFormat::Pdf => {
                export_table_pdf(&title, &state.settings.company_name, &table, path)
            }
            ExportFormat::Xlsx => export_table_xlsx(&table, path),
            other => Err(unsupported(other)),
        }
    }
}

fn unsupported(format: ExportFormat) -> AppError {
    AppError::Export(format!(
        "format '{}' is not available for this report",
        format.as_str()
    ))
}
