use std::path::{Path, PathBuf};

/// Result type for every stage of the split run
pub type SplitterResult<T> = Result<T, SplitterError>;

/// Errors that abort a split run. Nothing here is recovered from.
#[derive(Debug, thiserror::Error)]
pub enum SplitterError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),
}

impl SplitterError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SplitterError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
