use anyhow::{Context, Result};
use denolize_core::TransformedFile;
use log::trace;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Writes one transformed file below `out_dir`, creating parent directories.
/// Returns the path written.
pub fn write_output(out_dir: &Path, file: &TransformedFile) -> Result<PathBuf> {
    let output_path = out_dir.join(&file.destination_name);
    if let Some(parent) = output_path.parent() {
        // Workers may race on the same parent; create_dir_all tolerates it
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&output_path, &file.text)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    trace!("Wrote {} bytes to {}", file.text.len(), output_path.display());
    Ok(output_path)
}
