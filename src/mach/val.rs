use crate::error;
use crate::lang::ast::format_number;
use crate::lang::Error;
use std::convert::TryFrom;
use std::rc::Rc;

/// ## Runtime value

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    Integer(i64),
    String(Rc<str>),
    Boolean(bool),
}

impl Val {
    pub fn is_string(&self) -> bool {
        matches!(self, Val::String(_))
    }

    /// Booleans take part in arithmetic as 1 and 0.
    pub fn widen(self) -> Val {
        match self {
            Val::Boolean(b) => Val::Integer(b as i64),
            _ => self,
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Val::*;
        match self {
            Number(n) => write!(f, "{}", format_number(*n)),
            Integer(n) => write!(f, "{}", n),
            String(s) => write!(f, "{}", s),
            Boolean(b) => write!(f, "{}", if *b { 1 } else { 0 }),
        }
    }
}

impl TryFrom<Val> for f64 {
    type Error = Error;
    fn try_from(val: Val) -> std::result::Result<Self, Self::Error> {
        match val {
            Val::Number(n) => Ok(n),
            Val::Integer(n) => Ok(n as f64),
            Val::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
            Val::String(_) => Err(error!(TypeMismatch; "NUMBER EXPECTED")),
        }
    }
}

impl TryFrom<Val> for i64 {
    type Error = Error;
    fn try_from(val: Val) -> std::result::Result<Self, Self::Error> {
        match val {
            Val::Integer(n) => Ok(n),
            Val::Boolean(b) => Ok(b as i64),
            Val::Number(n) => {
                let n = n.trunc();
                if n.is_finite() && n >= i64::min_value() as f64 && n < i64::max_value() as f64 {
                    Ok(n as i64)
                } else {
                    Err(error!(Overflow))
                }
            }
            Val::String(_) => Err(error!(TypeMismatch; "INTEGER EXPECTED")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Val::Number(3.5).to_string(), "3.5");
        assert_eq!(Val::Number(4.0).to_string(), "4");
        assert_eq!(Val::Integer(-3).to_string(), "-3");
        assert_eq!(Val::Boolean(true).to_string(), "1");
        assert_eq!(Val::String("HI".into()).to_string(), "HI");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(f64::try_from(Val::Boolean(true)), Ok(1.0));
        assert_eq!(i64::try_from(Val::Number(-2.9)), Ok(-2));
        assert!(i64::try_from(Val::Number(1e300)).is_err());
        assert!(f64::try_from(Val::String("1".into())).is_err());
    }
}
