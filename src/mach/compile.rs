use super::{Opcode, Program};
use crate::lang::ast::Statement;
use crate::lang::{self, LineNumber};
use tracing::info;

/// Flatten a parsed program into jump-addressed instructions.
pub fn flatten(source: &lang::Program) -> Program {
    let mut program = Program::new();
    for line in source.lines() {
        program.index_line(line.number());
        for statement in line.statements() {
            flatten_statement(&mut program, line.number(), statement);
        }
    }
    info!(
        lines = source.len(),
        instructions = program.len(),
        "flattened program"
    );
    program
}

fn flatten_statement(program: &mut Program, line: LineNumber, statement: &Statement) {
    let (cond, then, otherwise) = match statement {
        Statement::If(_, cond, then, otherwise) => (cond, then, otherwise),
        _ => {
            program.push(line, Opcode::Statement(statement.clone()));
            return;
        }
    };
    // Patched once the end of the THEN block is known.
    let if_addr = program.push(line, Opcode::Jump(0));
    for statement in then {
        flatten_statement(program, line, statement);
    }
    let else_addr = if otherwise.is_empty() {
        program.len()
    } else {
        let jump_addr = program.push(line, Opcode::Jump(0));
        let else_addr = program.len();
        for statement in otherwise {
            flatten_statement(program, line, statement);
        }
        program.patch(jump_addr, Opcode::Jump(program.len()));
        else_addr
    };
    program.patch(if_addr, Opcode::IfNot(cond.clone(), else_addr));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{lex, parse};

    fn flatten_str(s: &str) -> Program {
        let (program, errors) = parse(&lex(s).unwrap());
        assert!(errors.is_empty(), "{:?}", errors);
        flatten(&program)
    }

    fn listing(program: &Program) -> Vec<String> {
        program
            .instructions()
            .iter()
            .map(|i| i.opcode.to_string())
            .collect()
    }

    #[test]
    fn test_if_then_else_jumps() {
        let p = flatten_str("10 IF X<10 THEN PRINT \"Y\":GOTO 20 ELSE PRINT \"N\":GOTO 30\n20 END\n30 END\n");
        assert_eq!(
            listing(&p),
            vec![
                "IFNOT(4) X<10",
                "PRINT \"Y\"",
                "GOTO 20",
                "JUMP(6)",
                "PRINT \"N\"",
                "GOTO 30",
                "END",
                "END"
            ]
        );
        assert_eq!(p.address_of(10), Some(0));
        assert_eq!(p.address_of(20), Some(6));
        assert_eq!(p.address_of(30), Some(7));
    }

    #[test]
    fn test_if_without_else_skips_then_block() {
        let p = flatten_str("10 IF A THEN B=1:C=2\n20 D=3\n");
        assert_eq!(listing(&p), vec!["IFNOT(3) A", "B=1", "C=2", "D=3"]);
    }

    #[test]
    fn test_nested_if() {
        let p = flatten_str("10 IF A THEN IF B THEN C=1\n20 END\n");
        assert_eq!(listing(&p), vec!["IFNOT(3) A", "IFNOT(3) B", "C=1", "END"]);
    }

    #[test]
    fn test_empty_line_points_at_next_instruction() {
        let p = flatten_str("10\n20 REM\n30 A=1\n");
        assert_eq!(p.address_of(10), Some(0));
        assert_eq!(p.address_of(20), Some(0));
        assert_eq!(p.address_of(30), Some(1));
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn test_duplicate_line_keeps_first_address() {
        let (program, _) = parse(&lex("10 A=1\n10 A=2\n").unwrap());
        let p = flatten(&program);
        assert_eq!(p.address_of(10), Some(0));
        assert_eq!(p.len(), 2);
    }
}
