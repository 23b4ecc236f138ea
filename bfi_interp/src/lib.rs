//! # Interpreter
//!
//! Runs compiled programs against a tape of byte cells that starts as a
//! single zero cell and grows one cell at a time as the head moves right.
//!
//! * `+` wraps from 255 to 0, `-` stops at 0.
//! * `<` on the first cell does nothing.
//! * `,` reads one byte; at end of input the [`EofPolicy`] decides.
//! * `.` writes the current cell as one byte.
//! * `[` and `]` jump past their partner using the program's jump table.
//!
//! ```
//! use bfi_interp::VMBuilder;
//!
//! let mut output = Vec::new();
//! let mut vm = VMBuilder::new()
//!     .set_program_reader("<<+.".as_bytes())
//!     .set_input(&b""[..])
//!     .set_output(&mut output)
//!     .build()
//!     .expect("program compiles");
//! vm.interpret().expect("program runs");
//! drop(vm);
//! assert_eq!(output, vec![1]);
//! ```

pub mod eof_policy;
pub mod vm;
pub mod vm_builder;
pub mod vm_error;
pub mod vm_iterator;

pub use eof_policy::EofPolicy;
pub use vm::{BrainfuckVM, StepOutcome};
pub use vm_builder::VMBuilder;
pub use vm_error::VMError;
pub use vm_iterator::VMIterator;
