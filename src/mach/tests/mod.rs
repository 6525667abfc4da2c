use crate::lang::{lex, parse};
use crate::mach::{Event, Runtime, Tty};

mod for_test;

type TestRuntime = Runtime<Tty<&'static [u8], Vec<u8>>>;

fn runtime(src: &str, input: &'static str) -> TestRuntime {
    let (program, errors) = parse(&lex(src).unwrap());
    assert!(errors.is_empty(), "{:?}", errors);
    let mut r = Runtime::new(Tty::new(input.as_bytes(), Vec::new()));
    r.load(&program);
    r
}

fn output(r: &TestRuntime) -> String {
    String::from_utf8(r.device().writer().clone()).unwrap()
}

fn run(src: &str) -> String {
    run_cycles(src, 5000)
}

fn run_cycles(src: &str, cycles: usize) -> String {
    let mut r = runtime(src, "");
    let mut prev_running = false;
    loop {
        match r.execute(cycles) {
            Event::Running => {
                if prev_running {
                    return format!("{}\n{} Execution cycles exceeded.\n", output(&r), cycles);
                }
                prev_running = true;
            }
            Event::Stopped | Event::Input | Event::Error(_) => break,
        }
    }
    output(&r)
}
