use std::path::PathBuf;

use bfi_interp::EofPolicy;
use clap::{ArgAction, Parser, ValueEnum};

/// Handle CLI arguments for bfi
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of bytes of program text to read from stdin.
    ///
    /// Whatever follows the program text on stdin is the program's input.
    /// Takes precedence over `--file` when both are given.
    #[clap(name = "LENGTH", required_unless_present = "file")]
    pub length: Option<usize>,

    /// Read the program from a file; all of stdin becomes the program's input
    #[arg(short, long, env = "BFI_FILE")]
    pub file: Option<PathBuf>,

    /// What `,` stores once input runs out
    #[arg(long, value_enum, default_value_t = EofArg::Zero)]
    pub eof: EofArg,

    /// Number of tape cells to reserve memory for up front
    #[arg(short, long)]
    pub tape_capacity: Option<usize>,

    /// Print the final VM state to stderr
    #[clap(short = 's', long)]
    pub report_state: bool,

    /// Increase logging, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EofArg {
    /// Store 0 and keep running
    Zero,
    /// Stop with an error
    Abort,
}

impl From<EofArg> for EofPolicy {
    fn from(arg: EofArg) -> Self {
        match arg {
            EofArg::Zero => EofPolicy::Zero,
            EofArg::Abort => EofPolicy::Abort,
        }
    }
}
