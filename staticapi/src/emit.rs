//! Writing rendered files to disk

use miette::{IntoDiagnostic, Result, WrapErr};
use staticapi_codegen::RenderedFile;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Write every file under `out_dir`, creating directories as needed.
/// Returns the paths written, in order. Nothing is written when two files
/// share a path.
pub fn write_files(out_dir: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::with_capacity(files.len());
    if let Some(duplicate) = files.iter().find(|file| !seen.insert(&file.path)) {
        return Err(miette::miette!(
            "More than one generated file would be written to {}",
            duplicate.path.display()
        ));
    }

    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, &file.contents)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

        tracing::debug!(path = %path.display(), "wrote facade");
        written.push(path);
    }

    Ok(written)
}
