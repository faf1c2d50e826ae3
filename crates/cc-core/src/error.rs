use thiserror::Error;

/// Errors originating from the codec core.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed symbol group, out-of-alphabet symbol, or invalid color table.
    #[error("Format invalide : {0}")]
    Format(String),

    /// Grid dimensions that cannot be represented or do not match the pixel buffer.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u64,
        /// Height value.
        height: u64,
    },
}

impl CoreError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}
