#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid product pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
