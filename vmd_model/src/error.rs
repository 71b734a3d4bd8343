use std::path::PathBuf;

use thiserror::Error;
use vmd_lib::error::ReadFileError;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path does not look like a motion file.
    /// Reported explicitly rather than skipping the file silently.
    #[error("unsupported input extension for {0:?}")]
    UnsupportedExtension(PathBuf),

    #[error("error reading motion file")]
    Vmd(#[from] ReadFileError),

    #[error("error saving animation clip")]
    Save(#[from] SaveClipError),
}

#[derive(Debug, Error)]
pub enum SaveClipError {
    #[error("error writing files")]
    Io(#[from] std::io::Error),

    #[error("error serializing JSON file")]
    Json(#[from] serde_json::Error),
}
