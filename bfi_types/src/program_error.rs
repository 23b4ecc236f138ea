use std::io;

/// Reasons a program could not be loaded or compiled.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// A `[` was never closed, or a `]` had nothing to close.
    #[error("unmatched '{bracket}' at line {line}, column {column}")]
    UnmatchedBracket {
        bracket: char,
        line: usize,
        column: usize,
    },

    /// The source stream ended before the announced program length was read.
    #[error("program text truncated: expected {expected} bytes, got {read}")]
    Truncated { expected: usize, read: usize },

    #[error("failed to read program: {0}")]
    Io(#[from] io::Error),
}

impl ProgramError {
    pub fn is_unmatched_bracket(&self) -> bool {
        matches!(self, ProgramError::UnmatchedBracket { .. })
    }
}
