use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown source tag: {0}")]
    UnknownSourceTag(String),
}
