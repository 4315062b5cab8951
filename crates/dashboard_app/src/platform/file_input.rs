use std::fs;
use std::path::{Path, PathBuf};

use dashboard_core::SelectedFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileLoadError {
    #[error("{0:?} is not a .csv file")]
    NotCsv(PathBuf),
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads the file picked in the upload form. Only `.csv` files are offered.
pub fn load_csv(path: &Path) -> Result<SelectedFile, FileLoadError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(FileLoadError::NotCsv(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| FileLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());
    Ok(SelectedFile { name, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_name_and_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Keywords.CSV");
        fs::write(&path, "keyword\nrust\n").unwrap();

        let file = load_csv(&path).unwrap();
        assert_eq!(file.name, "Keywords.CSV");
        assert_eq!(file.bytes, b"keyword\nrust\n");
    }

    #[test]
    fn rejects_other_extensions() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("keywords.txt");
        fs::write(&path, "keyword\n").unwrap();

        assert!(matches!(load_csv(&path), Err(FileLoadError::NotCsv(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.csv");

        assert!(matches!(load_csv(&path), Err(FileLoadError::Io { .. })));
    }
}
