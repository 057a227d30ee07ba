use thiserror::Error;

/// Errors produced while converting between wire reports, text and [`CanFrame`](crate::CanFrame).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Report too short: {len} bytes, need at least 5 (id + dlc)")]
    TooShort { len: usize },
    #[error("Invalid data byte '{0}', expected 1-2 hex digits")]
    InvalidByte(String),
    #[error("System frames cannot be encoded for the bus")]
    InvalidKind,
    #[error("Payload of {len} bytes does not fit the frame")]
    PayloadTooLong { len: usize },
}

/// Errors produced while rendering a trace.
///
/// Entry content never causes an error: malformed ids or data strings are
/// written as they are. Only the formatting machinery itself can fail.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to format trace content")]
    Format,
    #[cfg(feature = "export")]
    #[error("Failed to write CSV record. \nError: {0}")]
    Csv(#[from] csv::Error),
}

impl From<std::fmt::Error> for ExportError {
    fn from(_: std::fmt::Error) -> Self {
        ExportError::Format
    }
}
