use crate::bf_instructions::{HumanReadableInstruction, RawInstruction};
use crate::bf_jump_table::{InstructionPreprocessor, JumpTable};
use crate::program_error::ProgramError;
use core::fmt;
use std::{fs::File, io::Read, path::Path};

/// A compiled program: the instruction sequence with comments stripped and
/// every bracket resolved to its partner.
///
/// A `Program` only exists if its brackets balance, so an interpreter never
/// sees a partial jump table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<HumanReadableInstruction>,
    jump_table: JumpTable,
}

impl Program {
    /// Reads the whole of `reader` and compiles it.
    pub fn new<R: Read>(mut reader: R) -> Result<Self, ProgramError> {
        let mut source = Vec::new();
        reader.read_to_end(&mut source)?;
        Self::compile(&source)
    }

    /// Reads exactly `length` bytes of program text from `reader` and compiles them.
    ///
    /// Nothing past `length` is consumed, so the same stream can go on to
    /// feed the program's input.
    pub fn read_exactly<R: Read>(mut reader: R, length: usize) -> Result<Self, ProgramError> {
        let mut source = Vec::with_capacity(length);
        reader
            .by_ref()
            .take(length as u64)
            .read_to_end(&mut source)?;
        if source.len() < length {
            return Err(ProgramError::Truncated {
                expected: length,
                read: source.len(),
            });
        }
        Self::compile(&source)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProgramError> {
        let file = File::open(path)?;
        Self::new(file)
    }

    /// Compiles raw program text in a single pass.
    ///
    /// Bytes outside the instruction alphabet are dropped. Brackets are
    /// matched by their positions in the compiled sequence, not in `source`.
    pub fn compile(source: &[u8]) -> Result<Self, ProgramError> {
        let mut instructions = Vec::with_capacity(source.len());
        let mut preprocessor = InstructionPreprocessor::with_capacity(source.len());

        let mut line_idx = 0;
        let mut col_idx = 0;
        for &byte in source {
            if let Some(instruction) = RawInstruction::from_byte(byte) {
                let hr_instruction =
                    HumanReadableInstruction::new(instruction, line_idx, col_idx, instructions.len());
                preprocessor.process(hr_instruction)?;
                instructions.push(hr_instruction);
            }

            if byte == b'\n' {
                line_idx += 1;
                col_idx = 0;
            } else {
                col_idx += 1;
            }
        }

        let jump_table = preprocessor.finish()?;
        log::debug!(
            "Compiled {} instructions from {} source bytes, {} bracket pairs",
            instructions.len(),
            source.len(),
            jump_table.len()
        );

        Ok(Program {
            instructions,
            jump_table,
        })
    }

    pub fn instructions(&self) -> &[HumanReadableInstruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn jump_table(&self) -> &JumpTable {
        &self.jump_table
    }

    /// Position of the bracket matching the one at `index`.
    pub fn jump_target(&self, index: usize) -> Option<usize> {
        self.jump_table.get(index)
    }
}

// Prints the normalized source: instruction symbols only.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hr_instruction in &self.instructions {
            write!(f, "{}", hr_instruction.raw_instruction().symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfi_test_utils::{TestFile, HELLO_WORLD, TEST_FILE_NUM_INSTRUCTIONS};
    use std::io::{Cursor, Read};

    #[test]
    fn test_read_data() -> Result<(), Box<dyn std::error::Error>> {
        let program = Program::new(TestFile::new()?)?;

        assert_eq!(program.len(), TEST_FILE_NUM_INSTRUCTIONS);

        // "+[-[<<[+[--->]-[<<<]]]>>>-]"
        let all_instructions = [
            RawInstruction::IncrementByte,       // +
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementByte,       // -
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementPointer,    // <
            RawInstruction::DecrementPointer,    // <
            RawInstruction::ConditionalForward,  // [
            RawInstruction::IncrementByte,       // +
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementByte,       // -
            RawInstruction::DecrementByte,       // -
            RawInstruction::DecrementByte,       // -
            RawInstruction::IncrementPointer,    // >
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::DecrementByte,       // -
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementPointer,    // <
            RawInstruction::DecrementPointer,    // <
            RawInstruction::DecrementPointer,    // <
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::IncrementPointer,    // >
            RawInstruction::IncrementPointer,    // >
            RawInstruction::IncrementPointer,    // >
            RawInstruction::DecrementByte,       // -
            RawInstruction::ConditionalBackward, // ]
        ];

        for (i, instruction) in program.instructions().iter().enumerate() {
            assert_eq!(instruction.raw_instruction(), all_instructions[i]);
            assert_eq!(instruction.line(), 1);
            assert_eq!(instruction.column(), i + 1);
            assert_eq!(instruction.index(), i);
        }

        // Outermost pair spans the whole program
        assert_eq!(program.jump_target(1), Some(26));
        assert_eq!(program.jump_target(26), Some(1));
        Ok(())
    }

    #[test]
    fn test_jump_table_is_involution() -> Result<(), Box<dyn std::error::Error>> {
        let program = Program::compile(HELLO_WORLD.as_bytes())?;
        let mut brackets = 0;
        for hr_instruction in program.instructions() {
            let index = hr_instruction.index();
            match hr_instruction.raw_instruction() {
                RawInstruction::ConditionalForward => {
                    let close = program.jump_target(index).expect("[ must be matched");
                    assert!(close > index);
                    assert_eq!(
                        program.instructions()[close].raw_instruction(),
                        RawInstruction::ConditionalBackward
                    );
                    assert_eq!(program.jump_target(close), Some(index));
                    brackets += 1;
                }
                RawInstruction::ConditionalBackward => {
                    let open = program.jump_target(index).expect("] must be matched");
                    assert!(open < index);
                    assert_eq!(program.jump_target(open), Some(index));
                    brackets += 1;
                }
                _ => assert_eq!(program.jump_target(index), None),
            }
        }
        assert_eq!(brackets, 2 * program.jump_table().len());
        Ok(())
    }

    #[test]
    fn test_unmatched_open_bracket() {
        let err = Program::compile(b"[+").unwrap_err();
        assert!(err.is_unmatched_bracket(), "got {}", err);
    }

    #[test]
    fn test_stray_close_bracket() {
        let err = Program::compile(b"+]").unwrap_err();
        assert!(err.is_unmatched_bracket(), "got {}", err);
    }

    #[test]
    fn test_unmatched_position_counts_comments_and_lines() {
        match Program::compile(b"+ comment\n  ab[") {
            Err(ProgramError::UnmatchedBracket {
                bracket,
                line,
                column,
            }) => {
                assert_eq!(bracket, '[');
                assert_eq!(line, 2);
                assert_eq!(column, 5);
            }
            other => panic!("expected unmatched bracket, got {:?}", other),
        }
    }

    #[test]
    fn test_comments_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let with_comments = Program::compile(b"a+b")?;
        let bare = Program::compile(b"+")?;
        assert_eq!(with_comments.to_string(), bare.to_string());
        assert_eq!(with_comments.jump_table(), bare.jump_table());
        assert_eq!(
            with_comments.instructions()[0].raw_instruction(),
            RawInstruction::IncrementByte
        );
        Ok(())
    }

    #[test]
    fn test_brackets_match_on_compiled_positions() -> Result<(), Box<dyn std::error::Error>> {
        let program = Program::compile(b"x[ loop -\n ]y")?;
        assert_eq!(program.to_string(), "[-]");
        assert_eq!(program.jump_target(0), Some(2));
        assert_eq!(program.jump_target(2), Some(0));
        Ok(())
    }

    #[test]
    fn test_empty_and_comment_only_programs() -> Result<(), Box<dyn std::error::Error>> {
        assert!(Program::compile(b"")?.is_empty());
        assert!(Program::compile(b"just words\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_exactly_leaves_rest_of_stream() -> Result<(), Box<dyn std::error::Error>> {
        let mut stream = Cursor::new(b",.INPUT".to_vec());
        let program = Program::read_exactly(&mut stream, 2)?;
        assert_eq!(program.to_string(), ",.");

        let mut rest = String::new();
        stream.read_to_string(&mut rest)?;
        assert_eq!(rest, "INPUT");
        Ok(())
    }

    #[test]
    fn test_read_exactly_truncated() {
        match Program::read_exactly(Cursor::new(b"+++".to_vec()), 10) {
            Err(ProgramError::Truncated { expected, read }) => {
                assert_eq!(expected, 10);
                assert_eq!(read, 3);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let file = tempfile::NamedTempFile::new()?;
        std::fs::write(file.path(), "++[>+<-]\n")?;
        let program = Program::from_file(file.path())?;
        assert_eq!(program.to_string(), "++[>+<-]");
        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let err = Program::from_file("/definitely/not/here.bf").unwrap_err();
        assert!(matches!(err, ProgramError::Io(_)));
    }
}
