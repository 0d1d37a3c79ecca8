#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("no records to merge")]
    NoRecords,
}
