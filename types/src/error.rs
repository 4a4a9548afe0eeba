//! Parse errors for the textual forms of protocol types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid hexadecimal")]
    BadHex,

    #[error("wrong length: expected {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },
}
