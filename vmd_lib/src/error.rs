use std::path::PathBuf;

use thiserror::Error;

/// A parse failure with the path of the file being read.
#[derive(Debug, Error)]
#[error("error reading {path:?}")]
pub struct ReadFileError {
    pub path: PathBuf,
    #[source]
    pub source: binrw::Error,
}
