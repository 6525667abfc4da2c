use super::ast::*;
use super::token::{Kind, Token, Word};
use super::{Error, Line, LineNumber, Program};
use crate::error;
use std::collections::HashSet;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// Parse a whole token stream. Errors are collected rather than returned
/// early; a program is only fit to run when the error list is empty.
pub fn parse(tokens: &[Token]) -> (Program, Vec<Error>) {
    Parser::parse(tokens)
}

static EOF: Token = Token {
    kind: Kind::Eof,
    literal: String::new(),
    line: 0,
    column: 0,
};

struct PendingFor {
    var: Ident,
    pos: Pos,
}

struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    line_number: LineNumber,
    for_stack: Vec<PendingFor>,
    errors: Vec<Error>,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> (Program, Vec<Error>) {
        let mut parse = Parser {
            tokens,
            index: 0,
            line_number: 0,
            for_stack: vec![],
            errors: vec![],
        };
        let mut program = Program::new();
        let mut seen: HashSet<LineNumber> = HashSet::new();
        loop {
            let token = parse.peek();
            match token.kind {
                Kind::Eof => break,
                Kind::Eol => {
                    parse.next();
                }
                Kind::LineNum => {
                    if let Some(line) = parse.line() {
                        if !seen.insert(line.number()) {
                            let pos = Pos::new(line.number(), token.column, &token.literal);
                            parse.errors.push(error!(DuplicateLineNumber, ..&pos));
                        }
                        program.push(line);
                    }
                }
                _ => {
                    parse.errors.push(
                        error!(SyntaxError; format!("EXPECTED LINE NUMBER ON LINE {}", token.line))
                            .with_token(token.column, &token.literal),
                    );
                    parse.skip_line();
                }
            }
        }
        for pending in parse.for_stack.drain(..) {
            parse.errors.push(error!(MissingNext, ..&pending.pos));
        }
        (program, parse.errors)
    }

    fn peek(&self) -> &'a Token {
        self.tokens.get(self.index).unwrap_or(&EOF)
    }

    fn next(&mut self) -> &'a Token {
        let token = self.peek();
        if token.kind != Kind::Eof {
            self.index += 1;
        }
        token
    }

    fn pos(&self, token: &Token) -> Pos {
        Pos::new(self.line_number, token.column, &token.literal)
    }

    fn expect(&mut self, kind: Kind, msg: &'static str) -> Result<&'a Token> {
        let token = self.peek();
        if token.kind == kind {
            Ok(self.next())
        } else {
            Err(error!(SyntaxError, ..&self.pos(token); msg))
        }
    }

    fn skip_line(&mut self) {
        while !matches!(self.peek().kind, Kind::Eol | Kind::Eof) {
            self.next();
        }
    }

    /// Skip to the next `:` or end of line.
    fn synchronize(&mut self) {
        while !matches!(self.peek().kind, Kind::Colon | Kind::Eol | Kind::Eof) {
            self.next();
        }
    }

    fn line(&mut self) -> Option<Line> {
        let token = self.next();
        let number = match token.literal.parse::<LineNumber>() {
            Ok(number) => number,
            Err(_) => {
                self.errors.push(
                    error!(SyntaxError; format!("INVALID LINE NUMBER ON LINE {}", token.line))
                        .with_token(token.column, &token.literal),
                );
                self.skip_line();
                return None;
            }
        };
        self.line_number = number;
        let mut statements: Vec<Statement> = vec![];
        loop {
            match self.peek().kind {
                Kind::Eol | Kind::Eof => break,
                Kind::Colon => {
                    self.next();
                    continue;
                }
                _ => {}
            }
            match self.statement() {
                Ok(statement) => {
                    statements.push(statement);
                    if let Err(e) = self.end_of_statement() {
                        self.errors.push(e);
                        self.synchronize();
                    }
                }
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }
        debug!(line = number, statements = statements.len(), "parsed line");
        Some(Line::new(number, statements))
    }

    fn end_of_statement(&self) -> Result<()> {
        let token = self.peek();
        if matches!(token.kind, Kind::Colon | Kind::Eol | Kind::Eof) {
            Ok(())
        } else {
            Err(error!(SyntaxError, ..&self.pos(token); "EXPECTED END OF STATEMENT"))
        }
    }

    fn statement(&mut self) -> Result<Statement> {
        let token = self.peek();
        let pos = self.pos(token);
        match token.kind {
            Kind::Ident => Statement::r#let(self, pos),
            Kind::Keyword(word) => {
                self.next();
                Statement::for_word(self, word, pos)
            }
            _ => Err(error!(SyntaxError, ..&pos; "EXPECTED STATEMENT")),
        }
    }

    fn ident(&mut self) -> Result<Ident> {
        let token = self.peek();
        match token.kind {
            Kind::Ident => {
                self.next();
                Ok(Ident::from(token.literal.as_str()))
            }
            _ => Err(error!(SyntaxError, ..&self.pos(token); "EXPECTED VARIABLE")),
        }
    }

    fn infix_operator(kind: Kind) -> Option<Operator> {
        use Operator::*;
        Some(match kind {
            Kind::Plus => Plus,
            Kind::Minus => Minus,
            Kind::Asterisk => Multiply,
            Kind::Slash => Divide,
            Kind::Caret => Caret,
            Kind::Equal => Equal,
            Kind::NotEqual => NotEqual,
            Kind::Less => Less,
            Kind::LessEqual => LessEqual,
            Kind::Greater => Greater,
            Kind::GreaterEqual => GreaterEqual,
            _ => return None,
        })
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let mut lhs = this.prefix()?;
            loop {
                let token = this.peek();
                let op = match Parser::infix_operator(token.kind) {
                    Some(op) => op,
                    None => break,
                };
                if op.precedence() <= precedence {
                    break;
                }
                this.next();
                let pos = this.pos(token);
                let rhs = parse(this, op.precedence())?;
                lhs = Expression::Infix(pos, op, Box::new(lhs), Box::new(rhs));
            }
            Ok(lhs)
        }
        parse(self, 0)
    }

    fn prefix(&mut self) -> Result<Expression> {
        let token = self.peek();
        let pos = self.pos(token);
        let expr = match token.kind {
            Kind::Number => {
                self.next();
                match token.literal.parse::<f64>() {
                    Ok(n) => Expression::Number(pos, n),
                    Err(_) => return Err(error!(SyntaxError, ..&pos; "INVALID NUMBER")),
                }
            }
            Kind::String => {
                self.next();
                Expression::String(pos, token.literal.as_str().into())
            }
            Kind::Ident => {
                self.next();
                Expression::Var(pos, Ident::from(token.literal.as_str()))
            }
            Kind::Minus | Kind::Plus => {
                self.next();
                let op = if token.kind == Kind::Minus {
                    Operator::Minus
                } else {
                    Operator::Plus
                };
                // The operand binds tighter than any infix operator.
                let operand = self.prefix()?;
                Expression::Prefix(pos, op, Box::new(operand))
            }
            Kind::LParen => {
                self.next();
                let expr = self.expression()?;
                self.expect(Kind::RParen, "EXPECTED ')'")?;
                expr
            }
            Kind::Keyword(word @ Word::Int)
            | Kind::Keyword(word @ Word::Abs)
            | Kind::Keyword(word @ Word::Sgn) => {
                self.next();
                self.expect(Kind::LParen, "EXPECTED '('")?;
                let arg = Box::new(self.expression()?);
                self.expect(Kind::RParen, "EXPECTED ')'")?;
                match word {
                    Word::Int => Expression::Int(pos, arg),
                    Word::Abs => Expression::Abs(pos, arg),
                    _ => Expression::Sgn(pos, arg),
                }
            }
            Kind::Keyword(word) if !word.is_supported() => {
                return Err(error!(SyntaxError, ..&pos; "UNKNOWN KEYWORD"))
            }
            _ => return Err(error!(SyntaxError, ..&pos; "INVALID EXPRESSION")),
        };
        Ok(expr)
    }

    fn if_block(&mut self) -> Result<Vec<Statement>> {
        let token = self.peek();
        if token.kind == Kind::Number {
            let pos = self.pos(token);
            return Ok(vec![Statement::Goto(pos, self.expression()?)]);
        }
        let mut block: Vec<Statement> = vec![];
        loop {
            let token = self.peek();
            match token.kind {
                Kind::Eol | Kind::Eof | Kind::Keyword(Word::Else) => break,
                Kind::Colon => {
                    self.next();
                    continue;
                }
                _ => {}
            }
            block.push(self.statement()?);
            let token = self.peek();
            if !token.ends_statement() {
                return Err(error!(SyntaxError, ..&self.pos(token); "EXPECTED END OF STATEMENT"));
            }
        }
        Ok(block)
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: Word, pos: Pos) -> Result<Statement> {
        use Word::*;
        match word {
            End => Ok(Statement::End(pos)),
            For => Self::r#for(parse, pos),
            Get => Ok(Statement::Get(pos, parse.ident()?)),
            Gosub => Ok(Statement::Gosub(pos, parse.expression()?)),
            Goto => Ok(Statement::Goto(pos, parse.expression()?)),
            Home => Ok(Statement::Home(pos)),
            Htab => Ok(Statement::HTab(pos, parse.expression()?)),
            If => Self::r#if(parse, pos),
            Input => Self::r#input(parse, pos),
            Let => {
                let pos = parse.pos(parse.peek());
                Self::r#let(parse, pos)
            }
            Next => Self::r#next(parse, pos),
            Print => Self::r#print(parse, pos),
            Rem => Ok(Statement::Rem(pos)),
            Return => Ok(Statement::Return(pos)),
            Vtab => Ok(Statement::VTab(pos, parse.expression()?)),
            Abs | Else | Int | Sgn | Step | Then | To => {
                Err(error!(SyntaxError, ..&pos; "EXPECTED STATEMENT"))
            }
            _ => Err(error!(SyntaxError, ..&pos; "UNKNOWN KEYWORD")),
        }
    }

    fn r#let(parse: &mut Parser, pos: Pos) -> Result<Statement> {
        let ident = parse.ident()?;
        parse.expect(Kind::Equal, "EXPECTED '='")?;
        let expr = parse.expression()?;
        Ok(Statement::Let(pos, ident, expr))
    }

    fn r#for(parse: &mut Parser, pos: Pos) -> Result<Statement> {
        let var = parse.ident()?;
        parse.expect(Kind::Equal, "EXPECTED '='")?;
        let from = parse.expression()?;
        parse.expect(Kind::Keyword(Word::To), "EXPECTED TO")?;
        let to = parse.expression()?;
        let step = if parse.peek().is_word(Word::Step) {
            parse.next();
            Some(parse.expression()?)
        } else {
            None
        };
        parse.for_stack.push(PendingFor {
            var: var.clone(),
            pos: pos.clone(),
        });
        Ok(Statement::For(pos, var, from, to, step))
    }

    fn r#next(parse: &mut Parser, pos: Pos) -> Result<Statement> {
        let var = if parse.peek().kind == Kind::Ident {
            Some(parse.ident()?)
        } else {
            None
        };
        let pending = match parse.for_stack.pop() {
            Some(pending) => pending,
            None => return Err(error!(NextWithoutFor, ..&pos)),
        };
        match var {
            Some(var) if var != pending.var => Err(error!(SyntaxError, ..&pos;
                format!("MISMATCHED NEXT VARIABLE, EXPECTED {}", pending.var))),
            _ => Ok(Statement::Next(pos, pending.var, pending.pos.line)),
        }
    }

    fn r#print(parse: &mut Parser, pos: Pos) -> Result<Statement> {
        let mut exprs: Vec<Expression> = vec![];
        let mut separators: Vec<Separator> = vec![];
        loop {
            if parse.peek().ends_statement() {
                break;
            }
            exprs.push(parse.expression()?);
            match parse.peek().kind {
                Kind::Semicolon => separators.push(Separator::Semicolon),
                Kind::Comma => separators.push(Separator::Comma),
                _ => break,
            }
            parse.next();
        }
        Ok(Statement::Print(pos, exprs, separators))
    }

    fn r#input(parse: &mut Parser, pos: Pos) -> Result<Statement> {
        let token = parse.peek();
        let prompt = if token.kind == Kind::String {
            parse.next();
            parse.expect(Kind::Semicolon, "EXPECTED ';'")?;
            Some(token.literal.as_str().into())
        } else {
            None
        };
        let mut vars = vec![parse.ident()?];
        while parse.peek().kind == Kind::Comma {
            parse.next();
            vars.push(parse.ident()?);
        }
        Ok(Statement::Input(pos, prompt, vars))
    }

    fn r#if(parse: &mut Parser, pos: Pos) -> Result<Statement> {
        let predicate = parse.expression()?;
        let token = parse.peek();
        match token.kind {
            Kind::Keyword(Word::Then) => {
                parse.next();
            }
            Kind::Keyword(Word::Goto) => {}
            _ => return Err(error!(SyntaxError, ..&parse.pos(token); "EXPECTED THEN")),
        }
        let then = parse.if_block()?;
        let otherwise = if parse.peek().is_word(Word::Else) {
            parse.next();
            parse.if_block()?
        } else {
            vec![]
        };
        Ok(Statement::If(pos, predicate, then, otherwise))
    }
}
