use crate::errors::{AppError, AppResult};
use crate::models::state::AppState;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Top-level fields a document must carry to be accepted.
const REQUIRED_FIELDS: [&str; 3] = ["looms", "settings", "products"];

/// Parse an exported document, rejecting anything that does not look like one.
pub fn parse_document(text: &str) -> AppResult<AppState> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| AppError::InvalidBackup(e.to_string()))?;

    let obj = value
        .as_object()
        .ok_or_else(|| AppError::InvalidBackup("not a JSON object".to_string()))?;

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| !obj.contains_key(*f))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::InvalidBackup(format!(
            "missing field(s): {}",
            missing.join(", ")
        )));
    }

    serde_json::from_value(value).map_err(|e| AppError::InvalidBackup(e.to_string()))
}

pub fn to_document(state: &AppState) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn read_document_file(path: &Path) -> AppResult<AppState> {
    let text = fs::read_to_string(path)?;
    parse_document(&text)
}

pub struct BackupLogic;

impl BackupLogic {
    /// Write the whole document as pretty JSON.
    pub fn export_json(state: &AppState, dest: &Path) -> AppResult<()> {
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, to_document(state)?)?;
        Ok(())
    }

    /// Export the document, optionally zipped. Returns the final path.
    pub fn backup(state: &AppState, dest: &Path, compress: bool) -> AppResult<PathBuf> {
        Self::export_json(state, dest)?;

        if !compress {
            return Ok(dest.to_path_buf());
        }

        let zipped = compress_backup(dest)?;
        if zipped != dest
            && let Err(e) = fs::remove_file(dest)
        {
            tracing::warn!(path = %dest.display(), error = %e, "failed to remove uncompressed backup");
        }
        Ok(zipped)
    }
}

/// Compress a backup into a .zip next to it.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "loomshift.json".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path)
}
