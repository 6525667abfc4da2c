use super::{Function, Operation, Val, Var};
use crate::error;
use crate::lang::ast::Expression;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Evaluate an expression against variable memory. Operator and function
/// failures are reported at the position of the offending node.
pub fn evaluate(expr: &Expression, vars: &Var) -> Result<Val> {
    use Expression::*;
    match expr {
        Number(_, n) => Ok(Val::Number(*n)),
        String(_, s) => Ok(Val::String(s.clone())),
        Var(pos, ident) => match vars.get(ident) {
            Some(val) => Ok(val.clone()),
            None => Err(error!(UndefinedVariable, pos.line; ident.to_string())),
        },
        Prefix(pos, op, rhs) => {
            let rhs = evaluate(rhs, vars)?;
            Operation::prefix(*op, rhs).map_err(|e| e.at(pos))
        }
        Infix(pos, op, lhs, rhs) => {
            let lhs = evaluate(lhs, vars)?;
            let rhs = evaluate(rhs, vars)?;
            Operation::infix(*op, lhs, rhs).map_err(|e| e.at(pos))
        }
        Int(pos, arg) => Function::int(evaluate(arg, vars)?).map_err(|e| e.at(pos)),
        Abs(pos, arg) => Function::abs(evaluate(arg, vars)?).map_err(|e| e.at(pos)),
        Sgn(pos, arg) => Function::sgn(evaluate(arg, vars)?).map_err(|e| e.at(pos)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ast::{Ident, Statement};
    use crate::lang::{lex, parse, ErrorCode};

    fn eval_str(expr: &str, vars: &Var) -> Result<Val> {
        let (program, errors) = parse(&lex(&format!("10 Z={}\n", expr)).unwrap());
        assert!(errors.is_empty(), "{:?}", errors);
        match &program.lines()[0].statements()[0] {
            Statement::Let(_, _, expr) => evaluate(expr, vars),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_arithmetic() {
        let vars = Var::new();
        assert_eq!(eval_str("7/2", &vars), Ok(Val::Number(3.5)));
        assert_eq!(eval_str("1+2*3", &vars), Ok(Val::Number(7.0)));
        assert_eq!(eval_str("-2^2", &vars), Ok(Val::Number(4.0)));
        assert_eq!(eval_str("INT(-1.75)", &vars), Ok(Val::Integer(-2)));
        assert_eq!(eval_str("\"A\"+\"B\"", &vars), Ok(Val::String("AB".into())));
    }

    #[test]
    fn test_variables() {
        let mut vars = Var::new();
        vars.store(&Ident::from("A%"), Val::Integer(5)).unwrap();
        assert_eq!(eval_str("A%*2", &vars), Ok(Val::Integer(10)));
        assert_eq!(eval_str("A%>4", &vars), Ok(Val::Boolean(true)));
        let e = eval_str("B+1", &vars).unwrap_err();
        assert_eq!(e.code(), ErrorCode::UndefinedVariable);
        assert_eq!(e.to_string(), "UNDEFINED VARIABLE B IN 10 ()");
    }

    #[test]
    fn test_error_position() {
        let vars = Var::new();
        let e = eval_str("1/0", &vars).unwrap_err();
        assert_eq!(e.to_string(), "DIVISION BY ZERO IN 10 (/)");
        let e = eval_str("\"A\"-1", &vars).unwrap_err();
        assert_eq!(e.to_string(), "TYPE MISMATCH IN 10 (-)");
        let e = eval_str("ABS(\"A\")", &vars).unwrap_err();
        assert_eq!(e.to_string(), "TYPE MISMATCH IN 10 (ABS)");
    }
}
