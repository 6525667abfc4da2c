//! # BASIC
//!
//! Run or compile a line-numbered Applesoft style BASIC program.

mod term;

fn main() -> std::process::ExitCode {
    term::main()
}
