use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        println!("{}", content);
        Ok(())
    }

    /// Open the file in `editor`, then `$EDITOR`/`$VISUAL`, then the
    /// platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let requested = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => Ok(()),
            _ if requested != default_editor => {
                tracing::warn!(editor = %requested, fallback = %default_editor, "editor not available");
                let status = Command::new(&default_editor)
                    .arg(path)
                    .status()
                    .map_err(|e| AppError::Config(format!("{default_editor}: {e}")))?;
                if status.success() {
                    Ok(())
                } else {
                    Err(AppError::Config(format!("{default_editor} exited with {status}")))
                }
            }
            Ok(status) => Err(AppError::Config(format!("{requested} exited with {status}"))),
            Err(e) => Err(AppError::Config(format!("{requested}: {e}"))),
        }
    }
}
