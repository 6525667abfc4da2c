/*!
## Rust Machine Module

This Rust module flattens a parsed BASIC program into a jump-addressed
instruction array and executes it against a pluggable device.

*/

pub type Address = usize;

mod compile;
mod device;
mod evaluate;
mod function;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod text40;
mod tty;
mod val;
mod var;

pub use compile::flatten;
pub use device::Device;
pub use evaluate::evaluate;
pub use function::Function;
pub use opcode::Instruction;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Stack;
pub use text40::Text40;
pub use tty::Tty;
pub use val::Val;
pub use var::Var;

#[cfg(test)]
mod tests;
