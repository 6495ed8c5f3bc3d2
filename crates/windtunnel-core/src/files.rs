use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;

use crate::error::{PipelineError, Result};

/// CSV files directly inside `dir`, sorted by name.
pub(crate) fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PipelineError::Io {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
        });
    }

    let escaped = Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*");
    let pattern_str = pattern.to_string_lossy();

    let entries = glob::glob(&pattern_str).map_err(|err| PipelineError::InvalidInput {
        path: dir.to_path_buf(),
        message: format!("invalid directory pattern: {err}"),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| PipelineError::Io {
            path: err.path().to_path_buf(),
            source: err.into(),
        })?;
        if !path.is_file() {
            continue;
        }
        if is_csv(&path) {
            paths.push(path);
        } else {
            warn!(path = %path.display(), "skipping non-CSV file");
        }
    }

    Ok(paths)
}

pub(crate) fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PipelineError::InvalidInput {
            path: path.to_path_buf(),
            message: "file name is not valid UTF-8".to_string(),
        })
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
