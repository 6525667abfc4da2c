use super::{Address, Instruction, Opcode};
use crate::lang::LineNumber;
use std::collections::HashMap;

/// Flattened program: the instruction array plus the address of the first
/// instruction of every line.
#[derive(Debug, Default, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
    line_index: HashMap<LineNumber, Address>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, addr: Address) -> Option<&Instruction> {
        self.instructions.get(addr)
    }

    pub fn push(&mut self, line: LineNumber, opcode: Opcode) -> Address {
        self.instructions.push(Instruction { line, opcode });
        self.instructions.len() - 1
    }

    pub fn patch(&mut self, addr: Address, opcode: Opcode) {
        debug_assert!(addr < self.instructions.len());
        if let Some(instruction) = self.instructions.get_mut(addr) {
            instruction.opcode = opcode;
        }
    }

    /// The next instruction starts `line`. The first registration wins.
    pub fn index_line(&mut self, line: LineNumber) {
        let addr = self.instructions.len();
        self.line_index.entry(line).or_insert(addr);
    }

    pub fn address_of(&self, line: LineNumber) -> Option<Address> {
        self.line_index.get(&line).copied()
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (addr, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "{:04} {}", addr, instruction)?;
        }
        Ok(())
    }
}
