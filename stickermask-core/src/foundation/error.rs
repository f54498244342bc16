/// Convenience result type used across stickermask.
pub type MaskResult<T> = Result<T, MaskError>;

/// Top-level error taxonomy used by kernel and pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum MaskError {
    /// Malformed call: missing buffer, non-positive dimension, wrong buffer length.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Scratch allocation failed or exceeded the configured limit.
    #[error("memory error: {0}")]
    Memory(String),

    /// Reserved for failures inside a kernel. Not raised by the current kernels.
    #[error("processing error: {0}")]
    Processing(String),

    /// Invalid option documents (JSON config, CLI overrides).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskError {
    /// Build a [`MaskError::InvalidParams`] value.
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    /// Build a [`MaskError::Memory`] value.
    pub fn memory(msg: impl Into<String>) -> Self {
        Self::Memory(msg.into())
    }

    /// Build a [`MaskError::Processing`] value.
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }

    /// Build a [`MaskError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Host-facing status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParams(_) | Self::Validation(_) => StatusCode::InvalidParams,
            Self::Memory(_) => StatusCode::Memory,
            Self::Processing(_) | Self::Other(_) => StatusCode::Processing,
        }
    }
}

/// Return codes consumed by host applications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    /// Operation completed; output buffer fully written.
    Success = 0,
    /// Missing buffer, or non-positive dimension/parameter.
    InvalidParams = -1,
    /// Scratch allocation failed.
    Memory = -2,
    /// Reserved.
    Processing = -3,
}

impl StatusCode {
    /// Raw integer value of the code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Status of a finished call.
    pub fn of<T>(result: &MaskResult<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => e.status(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
