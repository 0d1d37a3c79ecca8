use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PatternsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON registry {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid registry: {message}")]
    InvalidRegistry { message: String },

    #[error("duplicate manufacturer in registry: {name}")]
    DuplicateManufacturer { name: String },

    #[error("unknown template: {name}")]
    UnknownTemplate { name: String },
}

impl PatternsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
