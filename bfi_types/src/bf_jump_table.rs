use crate::bf_instructions::{HumanReadableInstruction, RawInstruction};
use crate::program_error::ProgramError;

/// Bidirectional map between matched bracket positions.
///
/// Indexed by instruction position; only `[` and `]` positions hold a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<Option<usize>>,
}

impl JumpTable {
    /// Position of the bracket matching the one at `index`, if `index` is a bracket.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.targets.get(index).copied().flatten()
    }

    /// Iterates matched pairs as `(open, close)`, ordered by the opening bracket.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(index, target)| match target {
                Some(close) if *close > index => Some((index, *close)),
                _ => None,
            })
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.pairs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.iter().all(Option::is_none)
    }
}

/// Matches brackets one instruction at a time while a program is compiled.
#[derive(Debug, Default)]
pub(crate) struct InstructionPreprocessor {
    open_brackets: Vec<HumanReadableInstruction>,
    matching_brackets: Vec<Option<usize>>,
}

impl InstructionPreprocessor {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        InstructionPreprocessor {
            open_brackets: Vec::new(),
            matching_brackets: Vec::with_capacity(capacity),
        }
    }

    /// Records `hr_instruction`, which must be the next one in the output sequence.
    pub(crate) fn process(
        &mut self,
        hr_instruction: HumanReadableInstruction,
    ) -> Result<(), ProgramError> {
        let index = hr_instruction.index();
        debug_assert_eq!(index, self.matching_brackets.len());
        self.matching_brackets.push(None);

        match hr_instruction.raw_instruction() {
            RawInstruction::ConditionalForward => {
                self.open_brackets.push(hr_instruction);
            }
            RawInstruction::ConditionalBackward => {
                // The closing bracket matches the most recent open one. Nothing to pop means it is stray.
                let Some(open_bracket) = self.open_brackets.pop() else {
                    return Err(Self::unmatched(&hr_instruction));
                };
                let open = open_bracket.index();
                self.matching_brackets[open] = Some(index);
                self.matching_brackets[index] = Some(open);
            }
            _ => {}
        }
        Ok(())
    }

    /// Ends the scan. Any bracket still open is reported, innermost first.
    pub(crate) fn finish(mut self) -> Result<JumpTable, ProgramError> {
        if let Some(open_bracket) = self.open_brackets.pop() {
            return Err(Self::unmatched(&open_bracket));
        }
        Ok(JumpTable {
            targets: self.matching_brackets,
        })
    }

    fn unmatched(hr_instruction: &HumanReadableInstruction) -> ProgramError {
        let err = ProgramError::UnmatchedBracket {
            bracket: hr_instruction.raw_instruction().symbol(),
            line: hr_instruction.line(),
            column: hr_instruction.column(),
        };
        log::debug!("{}", err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preprocess(symbols: &str) -> Result<JumpTable, ProgramError> {
        let mut preprocessor = InstructionPreprocessor::with_capacity(symbols.len());
        for (index, byte) in symbols.bytes().enumerate() {
            let instruction = RawInstruction::from_byte(byte).expect("test input must be code");
            preprocessor.process(HumanReadableInstruction::new(instruction, 0, index, index))?;
        }
        preprocessor.finish()
    }

    #[test]
    fn test_nested_pairs() -> Result<(), Box<dyn std::error::Error>> {
        let table = preprocess("[[][]]")?;
        assert_eq!(table.pairs().collect::<Vec<_>>(), vec![(0, 5), (1, 2), (3, 4)]);
        assert_eq!(table.get(5), Some(0));
        assert_eq!(table.get(2), Some(1));
        assert_eq!(table.len(), 3);
        Ok(())
    }

    #[test]
    fn test_non_brackets_have_no_target() -> Result<(), Box<dyn std::error::Error>> {
        let table = preprocess("+[>]-")?;
        assert_eq!(table.get(0), None);
        assert_eq!(table.get(2), None);
        assert_eq!(table.get(4), None);
        assert_eq!(table.get(99), None);
        Ok(())
    }

    #[test]
    fn test_empty_table() -> Result<(), Box<dyn std::error::Error>> {
        let table = preprocess("+-<>")?;
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        Ok(())
    }

    #[test]
    fn test_stray_close_reports_its_position() {
        match preprocess("+]") {
            Err(ProgramError::UnmatchedBracket {
                bracket, column, ..
            }) => {
                assert_eq!(bracket, ']');
                assert_eq!(column, 2);
            }
            other => panic!("expected unmatched bracket, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_open_reports_innermost() {
        match preprocess("[[]+[") {
            Err(ProgramError::UnmatchedBracket {
                bracket, column, ..
            }) => {
                assert_eq!(bracket, '[');
                assert_eq!(column, 5);
            }
            other => panic!("expected unmatched bracket, got {:?}", other),
        }
    }
}
