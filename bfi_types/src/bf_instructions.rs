use core::fmt;

/// The eight instructions of the language.
///
/// Anything else in the source text is a comment and never becomes a
/// `RawInstruction`, so the interpreter can match exhaustively.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum RawInstruction {
    IncrementPointer,    // >
    DecrementPointer,    // <
    IncrementByte,       // +
    DecrementByte,       // -
    OutputByte,          // .
    InputByte,           // ,
    ConditionalForward,  // [
    ConditionalBackward, // ]
}

impl RawInstruction {
    /// Decodes a single source byte, returning `None` for comment bytes.
    pub fn from_byte(byte: u8) -> Option<RawInstruction> {
        match byte {
            b'>' => Some(RawInstruction::IncrementPointer),
            b'<' => Some(RawInstruction::DecrementPointer),
            b'+' => Some(RawInstruction::IncrementByte),
            b'-' => Some(RawInstruction::DecrementByte),
            b'.' => Some(RawInstruction::OutputByte),
            b',' => Some(RawInstruction::InputByte),
            b'[' => Some(RawInstruction::ConditionalForward),
            b']' => Some(RawInstruction::ConditionalBackward),
            _ => None,
        }
    }

    /// The source symbol for this instruction.
    pub fn symbol(&self) -> char {
        match self {
            RawInstruction::IncrementPointer => '>',
            RawInstruction::DecrementPointer => '<',
            RawInstruction::IncrementByte => '+',
            RawInstruction::DecrementByte => '-',
            RawInstruction::OutputByte => '.',
            RawInstruction::InputByte => ',',
            RawInstruction::ConditionalForward => '[',
            RawInstruction::ConditionalBackward => ']',
        }
    }

    pub fn is_bracket(&self) -> bool {
        matches!(
            self,
            RawInstruction::ConditionalForward | RawInstruction::ConditionalBackward
        )
    }
}

// Corresponding display strings
impl fmt::Display for RawInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RawInstruction::IncrementPointer => "Increment Pointer",
            RawInstruction::DecrementPointer => "Decrement Pointer",
            RawInstruction::IncrementByte => "Increment Byte",
            RawInstruction::DecrementByte => "Decrement Byte",
            RawInstruction::OutputByte => "Output Byte",
            RawInstruction::InputByte => "Input Byte",
            RawInstruction::ConditionalForward => "Conditional Forward",
            RawInstruction::ConditionalBackward => "Conditional Backward",
        };
        write!(f, "{} ({})", name, self.symbol())
    }
}

/// An instruction together with where it came from in the source text.
///
/// `line` and `column` are 1-based and count bytes of the raw text, comments
/// included. `index` is the position in the compiled instruction sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HumanReadableInstruction {
    instruction: RawInstruction,
    line: usize,
    column: usize,
    index: usize,
}

impl HumanReadableInstruction {
    pub(crate) fn new(
        instruction: RawInstruction,
        line: usize,
        column: usize,
        index: usize,
    ) -> Self {
        HumanReadableInstruction {
            instruction,
            line: line + 1,
            column: column + 1,
            index,
        }
    }

    pub fn raw_instruction(&self) -> RawInstruction {
        self.instruction
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

// Nice display string
impl fmt::Display for HumanReadableInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.instruction)
    }
}
