extern crate ansi_term;
extern crate ctrlc;
use ansi_term::Colour;
use basic::lang::{binary, dialect::Dialect, lex, parse, Program};
use basic::mach::{flatten, Device, Event, Runtime, Text40, Tty};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

mod console;
mod logging;

use console::Console;

const SLICE: usize = 5000;

/// Line-numbered Applesoft style BASIC
#[derive(Parser, Debug)]
#[command(name = "basic", version, about, long_about = None)]
struct Options {
    /// BASIC source file, or a compiled `.bin` program
    file: PathBuf,

    /// Write the program as a BASC binary next to FILE instead of running it
    #[arg(short = 'c', long)]
    compile: bool,

    /// Print the token stream
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parsed program and its flattened instructions
    #[arg(long)]
    dump_ast: bool,

    /// Target dialect recorded in compiled binaries: APPLE, C64 or AMS
    #[arg(long = "basic", value_name = "DIALECT", default_value = "APPLE")]
    basic: Dialect,

    /// Output device
    #[arg(short = 'm', long, value_enum, default_value_t = Machine::Tty)]
    machine: Machine,

    /// Log every executed instruction
    #[arg(long)]
    trace: bool,

    /// Write logs to PATH instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Machine {
    Tty,
    Text40,
}

pub fn main() -> ExitCode {
    let options = Options::parse();
    if let Err(error) = logging::init(options.trace, options.log_file.as_deref()) {
        report(&format!("logging: {}", error));
    }
    let program = match load(&options) {
        Ok(Some(program)) => program,
        Ok(None) => return ExitCode::SUCCESS,
        Err(()) => return ExitCode::from(1),
    };
    if options.compile {
        return compile(&options, &program);
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        report(&format!("Error setting Ctrl-C handler: {}", error));
    }

    match options.machine {
        Machine::Text40 => {
            let stdin = std::io::stdin();
            let device = Text40::new(stdin.lock(), std::io::stdout())
                .with_ansi(std::io::stdout().is_terminal());
            drive(device, &program, &interrupted)
        }
        Machine::Tty => {
            if std::io::stdin().is_terminal() {
                match Console::new(interrupted.clone()) {
                    Ok(console) => return drive(console, &program, &interrupted),
                    Err(error) => warn!(error = %error, "console unavailable, using plain tty"),
                }
            }
            let stdin = std::io::stdin();
            let device = Tty::new(stdin.lock(), std::io::stdout())
                .with_ansi(std::io::stdout().is_terminal());
            drive(device, &program, &interrupted)
        }
    }
}

fn report(message: &str) {
    eprintln!("{}", Colour::Red.bold().paint(message));
}

/// Read FILE. `Ok(None)` means a dump was requested and nothing should run.
fn load(options: &Options) -> Result<Option<Program>, ()> {
    let path = &options.file;
    if path.extension().map_or(false, |ext| ext == "bin") {
        let bytes = fs::read(path).map_err(|e| report(&format!("{}: {}", path.display(), e)))?;
        let (header, program) = binary::decode(&bytes)
            .map_err(|e| report(&format!("{}: {}", path.display(), e)))?;
        info!(dialect = %header.dialect, nodes = header.node_count, "loaded binary program");
        if options.dump_ast {
            println!("{}\n", header);
            return Ok(dump_program(&program));
        }
        return Ok(Some(program));
    }

    let source =
        fs::read_to_string(path).map_err(|e| report(&format!("{}: {}", path.display(), e)))?;
    let tokens = lex(&source).map_err(|e| report(&e.to_string()))?;
    if options.dump_tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }
    let (program, errors) = parse(&tokens);
    for error in &errors {
        report(&error.to_string());
    }
    if !errors.is_empty() {
        return Err(());
    }
    info!(lines = program.len(), "parsed {}", path.display());
    if options.dump_ast {
        return Ok(dump_program(&program));
    }
    if options.dump_tokens {
        return Ok(None);
    }
    Ok(Some(program))
}

fn dump_program(program: &Program) -> Option<Program> {
    print!("{}", program);
    println!();
    print!("{}", flatten(program));
    None
}

fn compile(options: &Options, program: &Program) -> ExitCode {
    let out = output_path(&options.file);
    let bytes = match binary::encode(program, options.basic) {
        Ok(bytes) => bytes,
        Err(error) => {
            report(&error.to_string());
            return ExitCode::from(1);
        }
    };
    if let Err(error) = fs::write(&out, &bytes) {
        report(&format!("{}: {}", out.display(), error));
        return ExitCode::from(1);
    }
    println!(
        "Compiled {} ({} bytes, {})",
        out.display(),
        bytes.len(),
        options.basic
    );
    ExitCode::SUCCESS
}

fn output_path(file: &Path) -> PathBuf {
    file.with_extension("bin")
}

fn drive<D: Device>(device: D, program: &Program, interrupted: &AtomicBool) -> ExitCode {
    let mut runtime = Runtime::new(device);
    runtime.load(program);
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.halt();
            runtime.device_mut().print_string("\nBREAK\n");
            runtime.device_mut().render();
            return ExitCode::from(130);
        }
        match runtime.execute(SLICE) {
            Event::Running => {}
            Event::Stopped => return ExitCode::SUCCESS,
            Event::Input if interrupted.load(Ordering::SeqCst) => {}
            Event::Input => {
                runtime.halt();
                return ExitCode::SUCCESS;
            }
            Event::Error(_) => return ExitCode::from(2),
        }
    }
}
