use crate::types::SourceLocation;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct TailError {
    pub code: String,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl TailError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn at_line(code: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            location: Some(SourceLocation { line }),
        }
    }

    /// Attaches a source line unless the error already carries one.
    pub fn or_at_line(mut self, line: usize) -> Self {
        if self.location.is_none() {
            self.location = Some(SourceLocation { line });
        }
        self
    }
}
