use thiserror::Error;

use crate::reader::ReadError;
use crate::types::SystemId;

/**
    Errors from PSSH box parsing.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PsshError {
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("truncated PSSH box: {field} needs {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("PSSH box declares {declared} bytes but is {actual} bytes long")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("PSSH system ID is {0}, expected {1}")]
    SystemIdMismatch(SystemId, SystemId),
}

impl PsshError {
    /**
        Returns `true` when the input itself is not a well-formed box
        (bad base64, truncated fields, or a declared length mismatch).
    */
    pub const fn is_format_error(&self) -> bool {
        !matches!(self, Self::SystemIdMismatch(..))
    }
}

impl From<ReadError> for PsshError {
    fn from(e: ReadError) -> Self {
        Self::Truncated {
            field: e.field,
            needed: e.needed,
            remaining: e.remaining,
        }
    }
}

/**
    Error returned by `FromStr` implementations on identifier types.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}
