use bfi_interp::VMBuilder;
use bfi_types::Program;
use clap::Parser;
use log::LevelFilter;
use std::error::Error;
use std::io::{self, BufWriter};
use std::process::ExitCode;

mod cli;

use cli::Cli;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Entry point for the interpreter.
///
/// The program text comes either from the first `LENGTH` bytes of stdin or
/// from `--file`. The rest of stdin is handed to the program as its input and
/// everything it writes goes to stdout.
///
/// # Examples
///
/// ```bash
/// printf '++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.' \
///     | cargo run -- 106
/// cargo run -- --file hello.bf < input.txt
/// ```
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut stdin = io::stdin().lock();

    let builder = match (cli.length, cli.file) {
        (Some(length), _) => {
            log::info!("Reading {} bytes of program text from stdin", length);
            VMBuilder::new().set_program(Program::read_exactly(&mut stdin, length)?)
        }
        (None, Some(file)) => VMBuilder::new().set_program_file(file),
        (None, None) => return Err("either LENGTH or --file must be given".into()),
    };

    let mut builder = builder
        .set_input(stdin)
        .set_output(BufWriter::new(io::stdout().lock()))
        .set_eof_policy(cli.eof.into())
        .set_report_state(cli.report_state);
    if let Some(tape_capacity) = cli.tape_capacity {
        builder = builder.set_tape_capacity(tape_capacity);
    }

    let mut vm = builder.build()?;
    if let Some(final_state) = vm.interpret()? {
        eprintln!("{}", final_state);
    }

    Ok(())
}
