use super::Address;
use crate::lang::ast::{Expression, Statement};
use crate::lang::LineNumber;

/// ## Flat instruction set
///
/// Structured `IF` does not survive flattening; it becomes an `IfNot` past
/// the THEN block and, when there is an ELSE block, a `Jump` over it.
///
/// `10 IF X THEN A=1 ELSE A=2` flattens to
/// `[IFNOT(2) X, A=1, JUMP(3), A=2]`

#[derive(Debug, Clone, PartialEq)]
pub enum Opcode {
    /// Any statement other than `IF`, executed as parsed.
    Statement(Statement),
    /// Evaluate the condition and branch to Address when it is false.
    IfNot(Expression, Address),
    /// Unconditional branch to Address.
    Jump(Address),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub line: LineNumber,
    pub opcode: Opcode,
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Statement(stmt) => write!(f, "{}", stmt),
            IfNot(cond, addr) => write!(f, "IFNOT({}) {}", addr, cond),
            Jump(addr) => write!(f, "JUMP({})", addr),
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:>5} {}", self.line, self.opcode)
    }
}
