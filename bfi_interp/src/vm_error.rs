use bfi_types::{HumanReadableInstruction, ProgramError};
use std::io;

/// Errors that stop a VM from being built or from running to completion.
#[derive(Debug, thiserror::Error)]
pub enum VMError {
    /// The program could not be read or its brackets do not balance. No VM is built.
    #[error(transparent)]
    Program(#[from] ProgramError),

    /// Input ran out under [`EofPolicy::Abort`](crate::EofPolicy::Abort).
    #[error("end of input at {instruction}")]
    EndOfInput {
        instruction: HumanReadableInstruction,
    },

    // Reading from the input or writing to the output failed
    #[error("IO error at {instruction}: {source}")]
    Io {
        instruction: HumanReadableInstruction,
        #[source]
        source: io::Error,
    },

    // A bracket without a partner in the jump table
    #[error("Program error at {instruction}. Reason: Could not find matching bracket")]
    MissingJumpTarget {
        instruction: HumanReadableInstruction,
    },

    #[error("failed to flush output: {0}")]
    Flush(#[source] io::Error),

    // Errors occurring during the construction of the VM, typically due to misconfiguration
    #[error("Builder error: {reason}")]
    Builder { reason: String },
}
