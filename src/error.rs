use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Tween property kinds do not match: {from} vs {to}")]
    PropertyMismatch { from: String, to: String },

    #[error("Sticky feature requires at least one item")]
    EmptyFeature,

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
