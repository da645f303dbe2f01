use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid date '{raw}': {source}")]
    InvalidDate {
        raw: String,
        source: chrono::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("receipt icon has no data-bill-url attribute")]
    MissingBillUrl,
    #[error("receipt modal unavailable: {0}")]
    Modal(#[from] dom::Error),
}
