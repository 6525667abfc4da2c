use super::Val;
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

pub struct Function {}

impl Function {
    /// Rounds toward negative infinity: `INT(-1.75)` is `-2`.
    pub fn int(val: Val) -> Result<Val> {
        use Val::*;
        match val.widen() {
            Integer(n) => Ok(Integer(n)),
            Number(n) => Ok(Integer(i64::try_from(Number(n.floor()))?)),
            String(_) | Boolean(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn abs(val: Val) -> Result<Val> {
        use Val::*;
        match val.widen() {
            Integer(n) => match n.checked_abs() {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow)),
            },
            Number(n) => Ok(Number(n.abs())),
            String(_) | Boolean(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn sgn(val: Val) -> Result<Val> {
        use Val::*;
        match val.widen() {
            Integer(n) => Ok(Integer(n.signum())),
            Number(n) if n > 0.0 => Ok(Integer(1)),
            Number(n) if n < 0.0 => Ok(Integer(-1)),
            Number(_) => Ok(Integer(0)),
            String(_) | Boolean(_) => Err(error!(TypeMismatch)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_floors() {
        assert_eq!(Function::int(Val::Number(1.75)), Ok(Val::Integer(1)));
        assert_eq!(Function::int(Val::Number(-1.75)), Ok(Val::Integer(-2)));
        assert_eq!(Function::int(Val::Number(-2.0)), Ok(Val::Integer(-2)));
        assert_eq!(Function::int(Val::Integer(7)), Ok(Val::Integer(7)));
    }

    #[test]
    fn test_abs_and_sgn() {
        assert_eq!(Function::abs(Val::Number(-2.5)), Ok(Val::Number(2.5)));
        assert_eq!(Function::abs(Val::Integer(-4)), Ok(Val::Integer(4)));
        assert_eq!(Function::sgn(Val::Number(-0.1)), Ok(Val::Integer(-1)));
        assert_eq!(Function::sgn(Val::Integer(0)), Ok(Val::Integer(0)));
        assert!(Function::sgn(Val::String("1".into())).is_err());
        assert!(Function::abs(Val::String("1".into())).is_err());
    }
}
