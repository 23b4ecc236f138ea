//! # Program Representation and State Types
//!
//! Compiles program text for the eight-instruction tape language into an
//! instruction sequence with every bracket resolved ahead of time, and
//! describes the state snapshots an interpreter reports while running it.
//!
//! ```
//! use bfi_types::Program;
//!
//! let program = Program::compile(b"++ two [ loop -> ]").expect("balanced");
//! assert_eq!(program.to_string(), "++[->]");
//! assert_eq!(program.jump_target(2), Some(5));
//! ```

// Handles the parsing and representation of individual instructions.
pub mod bf_instructions;

// Bracket matching and the resulting jump table.
pub mod bf_jump_table;

// Compiles programs from readers, files or raw bytes.
pub mod bf_program;

// Errors raised while loading or compiling a program.
pub mod program_error;

// Manages the state of the virtual machine during execution.
pub mod vm_state;

pub use bf_instructions::{HumanReadableInstruction, RawInstruction};
pub use bf_jump_table::JumpTable;
pub use bf_program::Program;
pub use program_error::ProgramError;
pub use vm_state::{VMState, VMStateFinal};
