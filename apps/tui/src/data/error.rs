use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading one of the input tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} contains no usable rows", path.display())]
    Empty { path: PathBuf },
}
