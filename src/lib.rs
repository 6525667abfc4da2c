//! # Applesoft BASIC
//!
//! A line-numbered BASIC in the style of the 8-bit era.
//!
//! Source text is lexed and parsed by [`lang`] into a [`lang::Program`],
//! which can be saved as a compact BASC binary with [`lang::binary`].
//! The [`mach`] module flattens a program into linear instructions and
//! runs them against a [`mach::Device`].
//!
//! ```
//! use basic::lang::{lex, parse};
//! use basic::mach::{Event, Runtime, Tty};
//!
//! let tokens = lex("10 PRINT \"HELLO\"").unwrap();
//! let (program, errors) = parse(&tokens);
//! assert!(errors.is_empty());
//! let mut runtime = Runtime::new(Tty::new(&b""[..], Vec::new()));
//! runtime.load(&program);
//! assert_eq!(runtime.execute(100), Event::Stopped);
//! assert_eq!(runtime.device().writer(), b"HELLO\n");
//! ```

pub mod lang;
pub mod mach;
