use super::Val;
use crate::error;
use crate::lang::ast::Operator;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Operator rules
///
/// A string on either side allows only `+`, which concatenates. Two integers
/// stay integral except for `/`. Anything else is computed in floating point.

pub struct Operation {}

impl Operation {
    pub fn prefix(op: Operator, val: Val) -> Result<Val> {
        use Val::*;
        match (op, val.widen()) {
            (Operator::Plus, val @ Integer(_)) | (Operator::Plus, val @ Number(_)) => Ok(val),
            (Operator::Minus, Integer(n)) => match n.checked_neg() {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow)),
            },
            (Operator::Minus, Number(n)) => Ok(Number(-n)),
            (Operator::Plus, _) | (Operator::Minus, _) => Err(error!(TypeMismatch)),
            _ => Err(error!(SyntaxError; "UNKNOWN PREFIX OPERATOR")),
        }
    }

    pub fn infix(op: Operator, lhs: Val, rhs: Val) -> Result<Val> {
        if lhs.is_string() || rhs.is_string() {
            return match op {
                Operator::Plus => Ok(Val::String(format!("{}{}", lhs, rhs).into())),
                _ => Err(error!(TypeMismatch)),
            };
        }
        match (lhs.widen(), rhs.widen()) {
            (Val::Integer(l), Val::Integer(r)) => Operation::integer(op, l, r),
            (lhs, rhs) => Operation::number(op, f64::try_from(lhs)?, f64::try_from(rhs)?),
        }
    }

    fn integer(op: Operator, l: i64, r: i64) -> Result<Val> {
        use Operator::*;
        let checked = match op {
            Plus => l.checked_add(r),
            Minus => l.checked_sub(r),
            Multiply => l.checked_mul(r),
            Caret => {
                return match i64::try_from(Val::Number((l as f64).powf(r as f64))) {
                    Ok(n) => Ok(Val::Integer(n)),
                    Err(_) => Err(error!(Overflow)),
                }
            }
            Divide => {
                if r == 0 {
                    return Err(error!(DivisionByZero));
                }
                return Ok(Val::Number(l as f64 / r as f64));
            }
            Equal => return Ok(Val::Boolean(l == r)),
            NotEqual => return Ok(Val::Boolean(l != r)),
            Less => return Ok(Val::Boolean(l < r)),
            LessEqual => return Ok(Val::Boolean(l <= r)),
            Greater => return Ok(Val::Boolean(l > r)),
            GreaterEqual => return Ok(Val::Boolean(l >= r)),
        };
        match checked {
            Some(n) => Ok(Val::Integer(n)),
            None => Err(error!(Overflow)),
        }
    }

    fn number(op: Operator, l: f64, r: f64) -> Result<Val> {
        use Operator::*;
        Ok(match op {
            Plus => Val::Number(l + r),
            Minus => Val::Number(l - r),
            Multiply => Val::Number(l * r),
            Caret => Val::Number(l.powf(r)),
            Divide => {
                if r == 0.0 {
                    return Err(error!(DivisionByZero));
                }
                Val::Number(l / r)
            }
            Equal => Val::Boolean(l == r),
            NotEqual => Val::Boolean(l != r),
            Less => Val::Boolean(l < r),
            LessEqual => Val::Boolean(l <= r),
            Greater => Val::Boolean(l > r),
            GreaterEqual => Val::Boolean(l >= r),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn s(v: &str) -> Val {
        Val::String(v.into())
    }

    #[test]
    fn test_integer_division_is_float() {
        let v = Operation::infix(Operator::Divide, Val::Integer(7), Val::Integer(2));
        assert_eq!(v, Ok(Val::Number(3.5)));
        let e = Operation::infix(Operator::Divide, Val::Integer(1), Val::Integer(0)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::DivisionByZero);
        let e = Operation::infix(Operator::Divide, Val::Number(1.0), Val::Integer(0)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::DivisionByZero);
    }

    #[test]
    fn test_integer_stays_integer() {
        assert_eq!(
            Operation::infix(Operator::Caret, Val::Integer(2), Val::Integer(10)),
            Ok(Val::Integer(1024))
        );
        assert_eq!(
            Operation::infix(Operator::Plus, Val::Integer(2), Val::Number(0.5)),
            Ok(Val::Number(2.5))
        );
        let e = Operation::infix(Operator::Multiply, Val::Integer(i64::max_value()), Val::Integer(2))
            .unwrap_err();
        assert_eq!(e.code(), ErrorCode::Overflow);
    }

    #[test]
    fn test_string_concatenation_only() {
        assert_eq!(
            Operation::infix(Operator::Plus, s("A"), Val::Number(1.5)),
            Ok(s("A1.5"))
        );
        assert_eq!(
            Operation::infix(Operator::Plus, Val::Integer(3), s("X")),
            Ok(s("3X"))
        );
        let e = Operation::infix(Operator::Equal, s("A"), s("A")).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
    }

    #[test]
    fn test_comparisons_and_booleans() {
        assert_eq!(
            Operation::infix(Operator::Less, Val::Integer(1), Val::Number(1.5)),
            Ok(Val::Boolean(true))
        );
        assert_eq!(
            Operation::infix(Operator::Plus, Val::Boolean(true), Val::Integer(1)),
            Ok(Val::Integer(2))
        );
    }

    #[test]
    fn test_prefix() {
        assert_eq!(Operation::prefix(Operator::Minus, Val::Integer(3)), Ok(Val::Integer(-3)));
        assert_eq!(Operation::prefix(Operator::Plus, Val::Number(0.5)), Ok(Val::Number(0.5)));
        let e = Operation::prefix(Operator::Minus, s("A")).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
    }
}
