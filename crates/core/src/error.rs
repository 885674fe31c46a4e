use thiserror::Error;

/// Identifier parsing failures at the edges (CLI arguments, stored preferences).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}
