use crate::bf_instructions::RawInstruction;
use core::fmt;

// Extends VMState with a snapshot of the VM's tape at the end of program execution,
// providing a complete picture of the final program state
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct VMStateFinal {
    state: VMState,
    tape: Vec<u8>,
}

impl VMStateFinal {
    pub fn new(state: VMState, tape: Vec<u8>) -> Self {
        VMStateFinal { state, tape }
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }
}

impl fmt::Display for VMStateFinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let non_zero_cells_str = self
            .tape
            .iter()
            .enumerate()
            .filter(|&(_, value)| *value != 0)
            .map(|(index, value)| format!("[{}, {}]", index, value))
            .collect::<Vec<String>>()
            .join(",");

        write!(
            f,
            "{}\nTape length: {}\nTape:\n{}",
            self.state,
            self.tape.len(),
            non_zero_cells_str
        )
    }
}

// Represents the state of the VM at a specific point in execution, useful for debugging or state inspection
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VMState {
    cell_value: u8,
    head: usize,
    next_index: usize,
    last_instruction: Option<RawInstruction>,
    instructions_processed: usize,
}

impl VMState {
    pub fn new(
        cell_value: u8,
        head: usize,
        next_index: usize,
        last_instruction: Option<RawInstruction>,
        instructions_processed: usize,
    ) -> Self {
        VMState {
            cell_value,
            head,
            next_index,
            last_instruction,
            instructions_processed,
        }
    }

    pub fn cell_value(&self) -> u8 {
        self.cell_value
    }

    pub fn head(&self) -> usize {
        self.head
    }

    /// Program counter after the step.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// The instruction that produced this state; `None` once the program has ended.
    pub fn last_instruction(&self) -> Option<RawInstruction> {
        self.last_instruction
    }

    pub fn instructions_processed(&self) -> usize {
        self.instructions_processed
    }
}

impl fmt::Display for VMState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell value: {}\nHead: {}\nNext instruction index: {}\nLast instruction: ",
            self.cell_value, self.head, self.next_index,
        )?;
        match self.last_instruction {
            Some(instruction) => write!(f, "{}", instruction)?,
            None => write!(f, "None")?,
        }
        write!(f, "\nInstructions processed: {}", self.instructions_processed)
    }
}
