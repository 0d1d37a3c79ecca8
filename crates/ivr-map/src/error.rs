#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// A rule names a transformer the registry does not provide. Caught when
    /// the rule set is bound, never per record.
    #[error("rule for `{target_field}` names unknown transformer `{transform}`")]
    UnknownTransformer {
        target_field: String,
        transform: String,
    },

    #[error(transparent)]
    Registry(#[from] ivr_patterns::PatternsError),
}
