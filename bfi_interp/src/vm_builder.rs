//! Provides a builder for creating instances of the BrainfuckVM struct.

use crate::{eof_policy::EofPolicy, vm::BrainfuckVM, vm_error::VMError};
use bfi_types::Program;
use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::PathBuf,
};

/// Memory reserved for the tape up front. The tape itself always starts as one cell.
pub const DEFAULT_TAPE_CAPACITY: usize = 8192;

/// Main builder object. Creates a BrainfuckVM according to various configs.
///
/// Exactly one program source must be set: an already compiled [`Program`],
/// a reader, or a file path.
///
/// # Examples
///
/// Program from a string
///
/// ```rust
/// use bfi_interp::vm_builder::VMBuilder;
///
/// let program_string = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
///
/// let mut output = Vec::new();
/// let mut vm = VMBuilder::new()
///     .set_program_reader(program_string.as_bytes())
///     .set_output(&mut output)
///     .build()
///     .expect("Failed!");
/// vm.interpret().expect("Failed!");
/// drop(vm);
/// assert_eq!(output, b"Hello World!\n");
/// ```
///
/// Program text of a known length, followed by the program's input on the same stream
///
/// ```rust
/// use bfi_interp::{vm_builder::VMBuilder, EofPolicy};
/// # use std::io::Cursor;
///
/// let stream = Cursor::new(b",.,.XY".to_vec());
/// let mut output = Vec::new();
/// let mut vm = VMBuilder::new()
///     .set_program_reader(stream)
///     .set_program_length(4)
///     .set_input(&b"XY"[..])
///     .set_output(&mut output)
///     .set_eof_policy(EofPolicy::Abort)
///     .set_tape_capacity(16)
///     .set_report_state(true)
///     .build()
///     .expect("Failed!");
/// let final_state = vm.interpret().expect("Failed!").expect("state reporting is on");
/// assert_eq!(final_state.state().instructions_processed(), 4);
/// ```
#[derive(Default)]
pub struct VMBuilder<'a> {
    program: Option<Program>,
    program_file: Option<PathBuf>,
    program_reader: Option<Box<dyn Read + 'a>>,
    program_length: Option<usize>,
    input_reader: Option<Box<dyn Read + 'a>>,
    output_writer: Option<Box<dyn Write + 'a>>,
    tape_capacity: Option<usize>,
    eof_policy: Option<EofPolicy>,
    report_state: Option<bool>,
}

impl<'a> VMBuilder<'a> {
    /// Creates a new instance of `VMBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the VM to use a custom input stream.
    pub fn set_input<R>(mut self, input: R) -> Self
    where
        R: Read + 'a,
    {
        self.input_reader = Some(Box::new(input));
        self
    }

    /// Sets a custom output stream for the VM.
    pub fn set_output<W>(mut self, output: W) -> Self
    where
        W: Write + 'a,
    {
        self.output_writer = Some(Box::new(output));
        self
    }

    /// Uses a program that has already been compiled.
    pub fn set_program(mut self, program: Program) -> Self {
        self.program = Some(program);
        self
    }

    /// Sets a file path to read the program from
    pub fn set_program_file(mut self, filepath: PathBuf) -> Self {
        self.program_file = Some(filepath);
        self
    }

    /// Loads a program from a reader.
    pub fn set_program_reader<T>(mut self, reader: T) -> Self
    where
        T: Read + 'a,
    {
        self.program_reader = Some(Box::new(reader));
        self
    }

    /// Reads exactly this many bytes of program text instead of the whole reader or file.
    pub fn set_program_length(mut self, length: usize) -> Self {
        self.program_length = Some(length);
        self
    }

    /// Reserves room for this many cells before the run starts.
    pub fn set_tape_capacity(mut self, tape_capacity: usize) -> Self {
        self.tape_capacity = Some(tape_capacity);
        self
    }

    /// Chooses what `,` does once the input is exhausted.
    pub fn set_eof_policy(mut self, eof_policy: EofPolicy) -> Self {
        self.eof_policy = Some(eof_policy);
        self
    }

    /// Enables or disables detailed state reporting after each instruction is processed.
    pub fn set_report_state(mut self, report_state: bool) -> Self {
        self.report_state = Some(report_state);
        self
    }

    fn load_program(
        program: Option<Program>,
        program_reader: Option<Box<dyn Read + 'a>>,
        program_file: Option<PathBuf>,
        program_length: Option<usize>,
    ) -> Result<Program, VMError> {
        let reader: Box<dyn Read + 'a> = match (program, program_reader, program_file) {
            (Some(program), None, None) => {
                if program_length.is_some() {
                    log::warn!("Program length ignored for an already compiled program");
                }
                return Ok(program);
            }
            (None, Some(reader), None) => reader,
            (None, None, Some(program_file)) => {
                log::info!("Reading program from {}", program_file.display());
                Box::new(BufReader::new(File::open(&program_file).map_err(|err| {
                    VMError::Builder {
                        reason: format!(
                            "Failed to open program file {}: {}",
                            program_file.display(),
                            err
                        ),
                    }
                })?))
            }
            (None, None, None) => {
                return Err(VMError::Builder {
                    reason: "Program must be set by using set_program, set_program_reader or set_program_file".to_string(),
                })
            }
            _ => {
                return Err(VMError::Builder {
                    reason: "Only one program source may be set".to_string(),
                })
            }
        };

        let program = match program_length {
            Some(length) => Program::read_exactly(reader, length)?,
            None => Program::new(reader)?,
        };
        Ok(program)
    }

    /// Builds and returns a `BrainfuckVM` instance based on the configured options.
    ///
    /// Fails before any VM exists if the program cannot be read or compiled.
    pub fn build(self) -> Result<BrainfuckVM<'a>, VMError> {
        let program = Self::load_program(
            self.program,
            self.program_reader,
            self.program_file,
            self.program_length,
        )?;

        // Default IO to use stdin and stdout
        let input_reader: Box<dyn Read + 'a> = match self.input_reader {
            Some(reader) => reader,
            None => {
                log::info!("Using default stdin");
                Box::new(io::stdin().lock())
            }
        };

        let output_writer: Box<dyn Write + 'a> = match self.output_writer {
            Some(writer) => writer,
            None => {
                log::info!("Using default stdout");
                Box::new(io::stdout().lock())
            }
        };

        let tape_capacity = self.tape_capacity.unwrap_or_else(|| {
            log::info!("Using default tape capacity {}", DEFAULT_TAPE_CAPACITY);
            DEFAULT_TAPE_CAPACITY
        });

        let eof_policy = self.eof_policy.unwrap_or_else(|| {
            log::info!("Using default end of input policy {}", EofPolicy::default());
            EofPolicy::default()
        });

        // If set, interpret will report the state after each iteration.
        // This is useful for debugging and testing but makes the program slower.
        let report_state = self.report_state.unwrap_or_else(|| {
            log::info!("Using default no state reporting");
            false
        });

        Ok(BrainfuckVM::new(
            program,
            tape_capacity,
            eof_policy,
            input_reader,
            output_writer,
            report_state,
        ))
    }
}
