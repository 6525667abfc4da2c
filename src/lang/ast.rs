use super::LineNumber;
use std::rc::Rc;

/// Where a node came from: BASIC line number, source column and the text of
/// the token that produced it. Diagnostics are reported from this.
#[derive(Debug, Clone, PartialEq)]
pub struct Pos {
    pub line: LineNumber,
    pub column: usize,
    pub token: Rc<str>,
}

impl Pos {
    pub fn new(line: LineNumber, column: usize, token: &str) -> Pos {
        Pos {
            line,
            column,
            token: token.into(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    End(Pos),
    For(Pos, Ident, Expression, Expression, Option<Expression>),
    Get(Pos, Ident),
    Gosub(Pos, Expression),
    Goto(Pos, Expression),
    Home(Pos),
    HTab(Pos, Expression),
    If(Pos, Expression, Vec<Statement>, Vec<Statement>),
    Input(Pos, Option<Rc<str>>, Vec<Ident>),
    Let(Pos, Ident, Expression),
    /// The line number is that of the matching `FOR`.
    Next(Pos, Ident, LineNumber),
    Print(Pos, Vec<Expression>, Vec<Separator>),
    Rem(Pos),
    Return(Pos),
    VTab(Pos, Expression),
}

impl Statement {
    pub fn pos(&self) -> &Pos {
        use Statement::*;
        match self {
            End(pos)
            | For(pos, ..)
            | Get(pos, _)
            | Gosub(pos, _)
            | Goto(pos, _)
            | Home(pos)
            | HTab(pos, _)
            | If(pos, ..)
            | Input(pos, ..)
            | Let(pos, ..)
            | Next(pos, ..)
            | Print(pos, ..)
            | Rem(pos)
            | Return(pos)
            | VTab(pos, _) => pos,
        }
    }
}

/// Variable name including its type suffix.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Ident {
    Plain(Rc<str>),
    String(Rc<str>),
    Integer(Rc<str>),
}

impl Ident {
    pub fn name(&self) -> &Rc<str> {
        match self {
            Ident::Plain(s) | Ident::String(s) | Ident::Integer(s) => s,
        }
    }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Ident {
        if s.ends_with('$') {
            Ident::String(s.into())
        } else if s.ends_with('%') {
            Ident::Integer(s.into())
        } else {
            Ident::Plain(s.into())
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Separator {
    Semicolon,
    Comma,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

pub const PREFIX_PRECEDENCE: usize = 6;

impl Operator {
    /// Binding power as an infix operator; prefix operators bind tighter.
    pub fn precedence(self) -> usize {
        use Operator::*;
        match self {
            Equal | NotEqual => 1,
            Less | LessEqual | Greater | GreaterEqual => 2,
            Plus | Minus => 3,
            Multiply | Divide => 4,
            Caret => 5,
        }
    }

    pub fn from_symbol(s: &str) -> Option<Operator> {
        use Operator::*;
        Some(match s {
            "^" => Caret,
            "*" => Multiply,
            "/" => Divide,
            "+" => Plus,
            "-" => Minus,
            "=" => Equal,
            "<>" => NotEqual,
            "<" => Less,
            "<=" => LessEqual,
            ">" => Greater,
            ">=" => GreaterEqual,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(Pos, f64),
    String(Pos, Rc<str>),
    Var(Pos, Ident),
    Prefix(Pos, Operator, Box<Expression>),
    Infix(Pos, Operator, Box<Expression>, Box<Expression>),
    Int(Pos, Box<Expression>),
    Abs(Pos, Box<Expression>),
    Sgn(Pos, Box<Expression>),
}

impl Expression {
    pub fn pos(&self) -> &Pos {
        use Expression::*;
        match self {
            Number(pos, _)
            | String(pos, _)
            | Var(pos, _)
            | Prefix(pos, ..)
            | Infix(pos, ..)
            | Int(pos, _)
            | Abs(pos, _)
            | Sgn(pos, _) => pos,
        }
    }

    fn binding(&self) -> usize {
        match self {
            Expression::Infix(_, op, ..) => op.precedence(),
            Expression::Prefix(..) => PREFIX_PRECEDENCE,
            _ => PREFIX_PRECEDENCE + 1,
        }
    }
}

/// Integral values print without a decimal point; everything else prints
/// the shortest round-trip digits, in exponent form outside 1e-4..1e6.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e18 {
        return format!("{}", n as i64);
    }
    if !n.is_finite() {
        return n.to_string().to_ascii_uppercase();
    }
    let sci = format!("{:e}", n);
    let (mantissa, exp) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        n.to_string()
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Expression::*;
        match self {
            Number(_, n) => write!(f, "{}", format_number(*n)),
            String(_, s) => write!(f, "\"{}\"", s),
            Var(_, ident) => write!(f, "{}", ident),
            Prefix(_, op, expr) => {
                if expr.binding() < PREFIX_PRECEDENCE {
                    write!(f, "{}({})", op, expr)
                } else {
                    write!(f, "{}{}", op, expr)
                }
            }
            Infix(_, op, lhs, rhs) => {
                let prec = op.precedence();
                if lhs.binding() < prec {
                    write!(f, "({})", lhs)?;
                } else {
                    write!(f, "{}", lhs)?;
                }
                write!(f, "{}", op)?;
                if rhs.binding() <= prec {
                    write!(f, "({})", rhs)
                } else {
                    write!(f, "{}", rhs)
                }
            }
            Int(_, expr) => write!(f, "INT({})", expr),
            Abs(_, expr) => write!(f, "ABS({})", expr),
            Sgn(_, expr) => write!(f, "SGN({})", expr),
        }
    }
}

fn write_block(f: &mut std::fmt::Formatter, block: &[Statement]) -> std::fmt::Result {
    for (i, stmt) in block.iter().enumerate() {
        if i > 0 {
            write!(f, ":")?;
        }
        write!(f, "{}", stmt)?;
    }
    Ok(())
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Statement::*;
        match self {
            End(_) => write!(f, "END"),
            For(_, var, from, to, step) => {
                write!(f, "FOR {}={} TO {}", var, from, to)?;
                match step {
                    Some(step) => write!(f, " STEP {}", step),
                    None => Ok(()),
                }
            }
            Get(_, var) => write!(f, "GET {}", var),
            Gosub(_, expr) => write!(f, "GOSUB {}", expr),
            Goto(_, expr) => write!(f, "GOTO {}", expr),
            Home(_) => write!(f, "HOME"),
            HTab(_, expr) => write!(f, "HTAB {}", expr),
            If(_, cond, then, otherwise) => {
                write!(f, "IF {} THEN ", cond)?;
                write_block(f, then)?;
                if !otherwise.is_empty() {
                    write!(f, " ELSE ")?;
                    write_block(f, otherwise)?;
                }
                Ok(())
            }
            Input(_, prompt, vars) => {
                write!(f, "INPUT ")?;
                if let Some(prompt) = prompt {
                    write!(f, "\"{}\";", prompt)?;
                }
                let names: Vec<std::string::String> = vars.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", names.join(","))
            }
            Let(_, var, expr) => write!(f, "{}={}", var, expr),
            Next(_, var, _) => write!(f, "NEXT {}", var),
            Print(_, exprs, seps) => {
                write!(f, "PRINT")?;
                for (i, expr) in exprs.iter().enumerate() {
                    if i == 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", expr)?;
                    match seps.get(i) {
                        Some(Separator::Semicolon) => write!(f, ";")?,
                        Some(Separator::Comma) => write!(f, ",")?,
                        None => {}
                    }
                }
                Ok(())
            }
            Rem(_) => write!(f, "REM"),
            Return(_) => write!(f, "RETURN"),
            VTab(_, expr) => write!(f, "VTAB {}", expr),
        }
    }
}

pub trait Visitor {
    fn visit_statement(&mut self, _: &Statement) {}
    fn visit_ident(&mut self, _: &Ident) {}
    fn visit_expression(&mut self, _: &Expression) {}
}

pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for Ident {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_ident(self)
    }
}

impl AcceptVisitor for Statement {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Statement::*;
        match self {
            End(_) | Home(_) | Rem(_) | Return(_) => {}
            For(_, ident, expr1, expr2, expr3) => {
                ident.accept(visitor);
                expr1.accept(visitor);
                expr2.accept(visitor);
                if let Some(expr3) = expr3 {
                    expr3.accept(visitor);
                }
            }
            Get(_, ident) | Next(_, ident, _) => ident.accept(visitor),
            Gosub(_, expr) | Goto(_, expr) | HTab(_, expr) | VTab(_, expr) => {
                expr.accept(visitor);
            }
            If(_, predicate, vec_stmt1, vec_stmt2) => {
                predicate.accept(visitor);
                for stmt in vec_stmt1 {
                    stmt.accept(visitor);
                }
                for stmt in vec_stmt2 {
                    stmt.accept(visitor);
                }
            }
            Input(_, _, vec_ident) => {
                for ident in vec_ident {
                    ident.accept(visitor);
                }
            }
            Let(_, ident, expr) => {
                ident.accept(visitor);
                expr.accept(visitor);
            }
            Print(_, vec_expr, _) => {
                for expr in vec_expr {
                    expr.accept(visitor);
                }
            }
        }
        visitor.visit_statement(self)
    }
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Expression::*;
        match self {
            Number(..) | String(..) => {}
            Var(_, ident) => ident.accept(visitor),
            Prefix(_, _, expr) | Int(_, expr) | Abs(_, expr) | Sgn(_, expr) => {
                expr.accept(visitor)
            }
            Infix(_, _, expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_expression(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<Expression> {
        Box::new(Expression::Number(Pos::new(10, 0, ""), n))
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(3.14), "3.14");
        assert_eq!(format_number(0.000001), "1e-06");
        assert_eq!(format_number(1000000.5), "1.0000005e+06");
        assert_eq!(format_number(1.0000000001), "1.0000000001");
        assert_eq!(format_number(-12.75), "-12.75");
    }

    #[test]
    fn test_display_parenthesizes_by_precedence() {
        let pos = Pos::new(10, 0, "");
        let sum = Expression::Infix(pos.clone(), Operator::Plus, num(1.0), num(2.0));
        let product = Expression::Infix(pos.clone(), Operator::Multiply, Box::new(sum), num(3.0));
        assert_eq!(product.to_string(), "(1+2)*3");
        let neg = Expression::Prefix(pos, Operator::Minus, Box::new(product));
        assert_eq!(neg.to_string(), "-((1+2)*3)");
    }

    #[test]
    fn test_ident_suffix() {
        assert_eq!(Ident::from("A$"), Ident::String("A$".into()));
        assert_eq!(Ident::from("B%"), Ident::Integer("B%".into()));
        assert_eq!(Ident::from("C"), Ident::Plain("C".into()));
    }
}
