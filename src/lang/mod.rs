/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the BASIC language,
plus the BASC binary program format.

*/

pub type LineNumber = u16;

#[macro_use]
mod error;
mod lex;
mod line;
mod parse;

pub mod ast;
pub mod binary;
pub mod dialect;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use error::ErrorKind;
pub use lex::lex;
pub use line::Line;
pub use line::Program;
pub use parse::parse;

#[cfg(test)]
mod tests;
