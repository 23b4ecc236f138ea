use crate::{eof_policy::EofPolicy, vm_error::VMError, vm_iterator::VMIterator};
use bfi_types::{HumanReadableInstruction, Program, RawInstruction, VMState, VMStateFinal};
use std::io::{self, Read, Write};

/// Result of a single call to [`BrainfuckVM::interpret_step`].
#[derive(Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction ran. Carries a snapshot when state reporting is on.
    Running(Option<VMState>),
    /// The program counter is past the last instruction.
    Finished(Option<VMStateFinal>),
}

// Represents the VM capable of interpreting programs. It manages the execution environment
// including the tape (memory), the instruction pointer, input/output streams, and execution state.
pub struct BrainfuckVM<'a> {
    tape: Vec<u8>,
    head: usize,
    instruction_index: usize,
    program: Program,
    input_reader: Box<dyn Read + 'a>,
    output_writer: Box<dyn Write + 'a>,
    eof_policy: EofPolicy,
    instructions_processed: usize,
    report_state: bool,
}

impl<'a> BrainfuckVM<'a> {
    /// Constructs a VM with a single zero cell. `tape_capacity` only reserves memory.
    pub fn new(
        program: Program,
        tape_capacity: usize,
        eof_policy: EofPolicy,
        input_reader: Box<dyn Read + 'a>,
        output_writer: Box<dyn Write + 'a>,
        report_state: bool,
    ) -> Self {
        let mut tape = Vec::with_capacity(tape_capacity);
        tape.push(0);
        BrainfuckVM {
            tape,
            head: 0,
            instruction_index: 0,
            program,
            input_reader,
            output_writer,
            eof_policy,
            instructions_processed: 0,
            report_state,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn instruction_index(&self) -> usize {
        self.instruction_index
    }

    pub fn instructions_processed(&self) -> usize {
        self.instructions_processed
    }

    pub fn eof_policy(&self) -> EofPolicy {
        self.eof_policy
    }

    pub fn is_finished(&self) -> bool {
        self.instruction_index >= self.program.len()
    }

    fn current_cell(&self) -> u8 {
        self.tape[self.head]
    }

    fn current_cell_mut(&mut self) -> &mut u8 {
        &mut self.tape[self.head]
    }

    fn jump_target(&self, hr_instruction: &HumanReadableInstruction) -> Result<usize, VMError> {
        self.program
            .jump_target(hr_instruction.index())
            .ok_or(VMError::MissingJumpTarget {
                instruction: *hr_instruction,
            })
    }

    fn process_instruction(&mut self) -> Result<RawInstruction, VMError> {
        let hr_instruction = self.program.instructions()[self.instruction_index];
        log::debug!("Processing instruction: {}", hr_instruction);
        match hr_instruction.raw_instruction() {
            RawInstruction::IncrementPointer => self.move_head_right(),
            RawInstruction::DecrementPointer => self.move_head_left(),
            RawInstruction::IncrementByte => {
                let cell = self.current_cell_mut();
                *cell = cell.wrapping_add(1);
            }
            RawInstruction::DecrementByte => {
                let cell = self.current_cell_mut();
                *cell = cell.saturating_sub(1);
            }
            RawInstruction::OutputByte => self.write_value(&hr_instruction)?,
            RawInstruction::InputByte => self.read_value(&hr_instruction)?,
            RawInstruction::ConditionalForward => {
                if self.current_cell() == 0 {
                    self.instruction_index = self.jump_target(&hr_instruction)?;
                    log::debug!("Jumping forward to {}", self.instruction_index);
                }
            }
            RawInstruction::ConditionalBackward => {
                if self.current_cell() != 0 {
                    self.instruction_index = self.jump_target(&hr_instruction)?;
                    log::debug!("Jumping back to {}", self.instruction_index);
                }
            }
        }

        // Execution resumes just past a matched bracket, so a taken jump still advances
        self.instruction_index += 1;
        // A program that never halts must not trip an overflow check
        self.instructions_processed = self.instructions_processed.wrapping_add(1);

        Ok(hr_instruction.raw_instruction())
    }

    /// Executes a single instruction, or reports that the program has finished.
    pub fn interpret_step(&mut self) -> Result<StepOutcome, VMError> {
        if self.is_finished() {
            // Only do this if reporting state, since tape clone is expensive
            let final_state = self
                .report_state
                .then(|| VMStateFinal::new(self.snapshot(None), self.tape.clone()));
            return Ok(StepOutcome::Finished(final_state));
        }

        let raw_instruction = self.process_instruction()?;
        let state = self
            .report_state
            .then(|| self.snapshot(Some(raw_instruction)));
        Ok(StepOutcome::Running(state))
    }

    /// Runs the program to completion and flushes the output.
    ///
    /// There is no step limit: a program that never ends keeps this call busy.
    pub fn interpret(&mut self) -> Result<Option<VMStateFinal>, VMError> {
        let final_state = loop {
            if let StepOutcome::Finished(final_state) = self.interpret_step()? {
                break final_state;
            }
        };
        self.output_writer.flush().map_err(VMError::Flush)?;
        log::info!(
            "Program finished after {} instructions, tape length {}",
            self.instructions_processed,
            self.tape.len()
        );
        Ok(final_state)
    }

    /// Returns an iterator that steps through the program one instruction at a time.
    pub fn steps(&mut self) -> VMIterator<'_, 'a> {
        VMIterator::new(self)
    }

    fn snapshot(&self, last_instruction: Option<RawInstruction>) -> VMState {
        VMState::new(
            self.current_cell(),
            self.head,
            self.instruction_index,
            last_instruction,
            self.instructions_processed,
        )
    }

    fn move_head_left(&mut self) {
        // Moving left of the first cell leaves the head where it is
        self.head = self.head.saturating_sub(1);
    }

    fn move_head_right(&mut self) {
        self.head += 1;
        if self.head == self.tape.len() {
            self.tape.push(0);
        }
    }

    fn read_value(&mut self, hr_instruction: &HumanReadableInstruction) -> Result<(), VMError> {
        let mut buffer = [0u8; 1];
        match self.input_reader.read_exact(&mut buffer) {
            Ok(()) => *self.current_cell_mut() = buffer[0],
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => match self.eof_policy {
                EofPolicy::Zero => {
                    log::debug!("End of input at {}, storing 0", hr_instruction);
                    *self.current_cell_mut() = 0;
                }
                EofPolicy::Abort => {
                    return Err(VMError::EndOfInput {
                        instruction: *hr_instruction,
                    })
                }
            },
            Err(e) => {
                return Err(VMError::Io {
                    instruction: *hr_instruction,
                    source: e,
                })
            }
        }
        Ok(())
    }

    fn write_value(&mut self, hr_instruction: &HumanReadableInstruction) -> Result<(), VMError> {
        let value = self.current_cell();
        self.output_writer
            .write_all(&[value])
            .map_err(|e| VMError::Io {
                instruction: *hr_instruction,
                source: e,
            })
    }
}
