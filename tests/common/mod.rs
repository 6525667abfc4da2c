#![allow(dead_code)]
use basic::lang::{lex, parse, Program};
use basic::mach::{Event, Runtime, Tty};

pub fn program(src: &str) -> Program {
    let (program, errors) = parse(&lex(src).unwrap());
    assert!(errors.is_empty(), "{:?}", errors);
    program
}

pub fn run(src: &str) -> String {
    run_with_input(src, "")
}

/// Run to completion, feeding `input` to INPUT and GET.
pub fn run_with_input(src: &str, input: &str) -> String {
    let cycles = 5000;
    let mut r = Runtime::new(Tty::new(input.as_bytes(), Vec::new()));
    r.load(&program(src));
    let mut prev_running = false;
    let mut s = String::new();
    loop {
        match r.execute(cycles) {
            Event::Running => {
                if prev_running {
                    s = format!("\n{} Execution cycles exceeded.\n", cycles);
                    break;
                }
                prev_running = true;
            }
            Event::Stopped | Event::Input | Event::Error(_) => break,
        }
    }
    String::from_utf8(r.device().writer().clone()).unwrap() + &s
}

pub fn parse_errors(src: &str) -> Vec<String> {
    let (_, errors) = parse(&lex(src).unwrap());
    errors.iter().map(|e| e.to_string()).collect()
}
