use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown user type '{0}'")]
    UnknownUserKind(String),
    #[error("malformed session: {0}")]
    Malformed(#[from] serde_json::Error),
}
