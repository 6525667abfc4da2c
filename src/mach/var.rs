use super::Val;
use crate::error;
use crate::lang::ast::Ident;
use crate::lang::Error;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Keys include the type suffix, so `A`, `A%` and `A$` are distinct.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, Val>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// `None` when the variable was never assigned.
    pub fn get(&self, ident: &Ident) -> Option<&Val> {
        self.vars.get(ident.name())
    }

    /// Stored value, or the zero value of the variable's type.
    pub fn fetch(&self, ident: &Ident) -> Val {
        match self.get(ident) {
            Some(val) => val.clone(),
            None => match ident {
                Ident::String(_) => Val::String("".into()),
                Ident::Integer(_) => Val::Integer(0),
                Ident::Plain(_) => Val::Number(0.0),
            },
        }
    }

    pub fn store(&mut self, ident: &Ident, value: Val) -> Result<()> {
        if self.vars.len() >= u16::max_value() as usize && self.get(ident).is_none() {
            return Err(error!(OutOfMemory; "TOO MANY VARIABLES"));
        }
        match ident {
            Ident::String(name) => self.insert_string(name, value),
            Ident::Integer(name) => self.insert_integer(name, value),
            Ident::Plain(name) => self.insert_number(name, value),
        }
    }

    fn insert_string(&mut self, name: &Rc<str>, value: Val) -> Result<()> {
        match value {
            Val::String(_) => {
                self.vars.insert(name.clone(), value);
                Ok(())
            }
            _ => Err(error!(TypeMismatch; "STRING EXPECTED")),
        }
    }

    fn insert_integer(&mut self, name: &Rc<str>, value: Val) -> Result<()> {
        if value.is_string() {
            return Err(error!(TypeMismatch; "INTEGER EXPECTED"));
        }
        let n = i64::try_from(value)?;
        self.vars.insert(name.clone(), Val::Integer(n));
        Ok(())
    }

    fn insert_number(&mut self, name: &Rc<str>, value: Val) -> Result<()> {
        if value.is_string() {
            return Err(error!(TypeMismatch; "FLOAT EXPECTED"));
        }
        let n = f64::try_from(value)?;
        self.vars.insert(name.clone(), Val::Number(n));
        Ok(())
    }
}
