use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid split definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no class labels were given")]
    NoClasses,
    #[error("file name {0:?} is not valid UTF-8")]
    NonUtf8FileName(std::ffi::OsString),
}

impl SplitError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("label ordinal {found} is out of range (max {max})")]
pub struct LabelOrdinalError {
    pub found: usize,
    pub max: usize,
}
