use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KslistError>;

#[derive(Debug, Error)]
pub enum KslistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid root directory: {0}")]
    InvalidRoot(PathBuf),
    #[error("Invalid extension preset {0} (expected 1..={max})", max = crate::options::ExtensionPreset::ALL.len())]
    InvalidPreset(usize),
    #[error("No file paths were given")]
    EmptyList,
    #[error("Invalid profile name: {0:?}")]
    InvalidProfileName(String),
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),
    #[error("Invalid profile {path}: {message}")]
    Profile { path: PathBuf, message: String },
}

impl KslistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KslistError::Io {
            path: path.into(),
            source,
        }
    }
}
