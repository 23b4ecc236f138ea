use core::fmt;

/// What `,` does when the input stream has no more bytes.
///
/// One policy is fixed per VM and applies to every `,` of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// Store 0 in the current cell and carry on.
    #[default]
    Zero,
    /// Stop the run with [`VMError::EndOfInput`](crate::VMError::EndOfInput).
    Abort,
}

impl fmt::Display for EofPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EofPolicy::Zero => write!(f, "zero"),
            EofPolicy::Abort => write!(f, "abort"),
        }
    }
}
