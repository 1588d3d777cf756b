use std::{fs, path::{Path, PathBuf}};

use log::error;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileReadError {
    #[error("unable to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("unable to parse {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

pub fn read_json_from_file<T: DeserializeOwned>(path: &Path) -> Result<T, FileReadError> {
    let file_content = fs::read_to_string(path).map_err(|source| {
        error!("target path: {}", path.display());
        FileReadError::Read { path: path.to_path_buf(), source }
    })?;

    return serde_json::from_str(&file_content).map_err(|source| FileReadError::Parse {
        path: path.to_path_buf(),
        source,
    });
}
