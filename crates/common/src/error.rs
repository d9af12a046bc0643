//! Common error types.

use thiserror::Error;

/// Main error type for the typesetter.
#[derive(Error, Debug)]
pub enum FormulaError {
    #[error("Parse error at offset {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Invalid scale: {0} (must be finite and positive)")]
    InvalidScale(f32),

    #[error("Invalid origin: ({x}, {y}) (must be finite)")]
    InvalidOrigin { x: f32, y: f32 },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Expression nests {depth} levels deep (limit {limit})")]
    TooDeep { depth: usize, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type FormulaResult<T> = Result<T, FormulaError>;

impl FormulaError {
    pub fn parse(position: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: msg.into(),
        }
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    pub fn serialize(msg: impl Into<String>) -> Self {
        Self::Serialize(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Offset into the source text, for errors that have one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Parse { position, .. } => Some(*position),
            _ => None,
        }
    }
}
