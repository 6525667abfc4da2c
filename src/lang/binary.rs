//! BASC binary program format.
//!
//! A 14 byte little-endian header (`"BASC"`, dialect tag, version, node
//! count, CRC-32 of the payload) followed by the encoded lines. Only `LET`,
//! `PRINT`, `FOR` and `NEXT` are representable; `REM` is dropped on encode.
//! `PRINT` keeps no separators, so only `;` between items is accepted.

use super::ast::*;
use super::dialect::Dialect;
use super::{Line, LineNumber, Program};
use std::convert::TryFrom;
use tracing::{debug, info};

pub const MAGIC: [u8; 4] = *b"BASC";
pub const HEADER_LEN: usize = 14;

const STMT_LET: u8 = 0x01;
const STMT_PRINT: u8 = 0x02;
const STMT_FOR: u8 = 0x03;
const STMT_NEXT: u8 = 0x04;

const EXPR_NUMBER: u8 = 0x10;
const EXPR_STRING: u8 = 0x11;
const EXPR_IDENT: u8 = 0x12;
const EXPR_PREFIX: u8 = 0x13;
const EXPR_INFIX: u8 = 0x14;

#[derive(Debug, Clone, PartialEq)]
pub enum BinaryError {
    UnexpectedEof,
    InvalidMagic([u8; 4]),
    UnknownDialect(u8),
    VersionMismatch {
        dialect: Dialect,
        expected: u8,
        found: u8,
    },
    ChecksumMismatch {
        expected: u32,
        found: u32,
    },
    InvalidStatementOpcode(u8),
    InvalidExpressionOpcode(u8),
    InvalidOperator(String),
    InvalidUtf8,
    StringTooLong(usize),
    CountTooLarge(&'static str, usize),
    UnsupportedStatement(LineNumber, String),
    UnsupportedExpression(LineNumber, String),
    NextWithoutFor(LineNumber),
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryError::*;
        match self {
            UnexpectedEof => write!(f, "unexpected end of input"),
            InvalidMagic(found) => write!(f, "invalid magic: {:?}", found),
            UnknownDialect(tag) => write!(f, "unknown BASIC type: {}", tag),
            VersionMismatch {
                dialect,
                expected,
                found,
            } => write!(
                f,
                "BASIC version mismatch for {}: expected {}, found {}",
                dialect, expected, found
            ),
            ChecksumMismatch { expected, found } => write!(
                f,
                "CRC32 mismatch (expected 0x{:08X}, got 0x{:08X})",
                expected, found
            ),
            InvalidStatementOpcode(op) => write!(f, "unknown statement opcode 0x{:02X}", op),
            InvalidExpressionOpcode(op) => write!(f, "unknown expression opcode 0x{:02X}", op),
            InvalidOperator(op) => write!(f, "unknown operator: {:?}", op),
            InvalidUtf8 => write!(f, "invalid utf-8 string"),
            StringTooLong(len) => write!(f, "string too long: {}", len),
            CountTooLarge(field, len) => write!(f, "{} count too large: {}", field, len),
            UnsupportedStatement(line, stmt) => {
                write!(f, "statement not representable in line {}: {}", line, stmt)
            }
            UnsupportedExpression(line, expr) => {
                write!(f, "expression not representable in line {}: {}", line, expr)
            }
            NextWithoutFor(line) => write!(f, "NEXT without FOR in line {}", line),
        }
    }
}

impl std::error::Error for BinaryError {}

type Result<T> = std::result::Result<T, BinaryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub dialect: Dialect,
    pub version: u8,
    pub node_count: u32,
    pub crc32: u32,
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Magic     : BASC")?;
        writeln!(f, "Basic type: {}", self.dialect)?;
        writeln!(f, "Version   : {}", self.version)?;
        writeln!(f, "Nodes     : {}", self.node_count)?;
        write!(f, "CRC32     : 0x{:08X}", self.crc32)
    }
}

/// Lines, statements and expressions that make it into the payload.
pub fn count_nodes(program: &Program) -> u32 {
    struct NodeCounter(u32);
    impl Visitor for NodeCounter {
        fn visit_statement(&mut self, stmt: &Statement) {
            if !matches!(stmt, Statement::Rem(_)) {
                self.0 += 1;
            }
        }
        fn visit_expression(&mut self, _: &Expression) {
            self.0 += 1;
        }
    }
    let mut counter = NodeCounter(0);
    for line in program.lines() {
        counter.0 += 1;
        for stmt in line.statements() {
            stmt.accept(&mut counter);
        }
    }
    counter.0
}

pub fn encode(program: &Program, dialect: Dialect) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    for line in program.lines() {
        write_line(line, &mut payload)?;
    }
    let header = Header {
        dialect,
        version: dialect.version(),
        node_count: count_nodes(program),
        crc32: crc::crc32::checksum_ieee(&payload),
    };
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&MAGIC);
    out.push(header.dialect.tag());
    out.push(header.version);
    out.extend_from_slice(&header.node_count.to_le_bytes());
    out.extend_from_slice(&header.crc32.to_le_bytes());
    out.extend_from_slice(&payload);
    debug!(
        dialect = %dialect,
        nodes = header.node_count,
        bytes = out.len(),
        "encoded BASC program"
    );
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<(Header, Program)> {
    let mut cursor = Cursor::new(bytes);
    let magic = cursor.read_exact_array::<4>()?;
    if magic != MAGIC {
        return Err(BinaryError::InvalidMagic(magic));
    }
    let tag = cursor.read_u8()?;
    let dialect = Dialect::from_tag(tag).ok_or(BinaryError::UnknownDialect(tag))?;
    let version = cursor.read_u8()?;
    if version != dialect.version() {
        return Err(BinaryError::VersionMismatch {
            dialect,
            expected: dialect.version(),
            found: version,
        });
    }
    let node_count = cursor.read_u32()?;
    let expected = cursor.read_u32()?;
    let payload = cursor.rest();
    let found = crc::crc32::checksum_ieee(payload);
    if found != expected {
        return Err(BinaryError::ChecksumMismatch { expected, found });
    }
    let header = Header {
        dialect,
        version,
        node_count,
        crc32: expected,
    };

    let mut decoder = Decoder {
        cursor: Cursor::new(payload),
        for_lines: vec![],
    };
    let mut program = Program::new();
    while !decoder.cursor.is_eof() {
        program.push(decoder.line()?);
    }
    info!(
        dialect = %header.dialect,
        version = header.version,
        nodes = header.node_count,
        crc32 = header.crc32,
        "decoded BASC program"
    );
    Ok((header, program))
}

fn write_line(line: &Line, out: &mut Vec<u8>) -> Result<()> {
    let statements: Vec<&Statement> = line
        .statements()
        .iter()
        .filter(|stmt| !matches!(stmt, Statement::Rem(_)))
        .collect();
    out.extend_from_slice(&line.number().to_le_bytes());
    write_u16_count("statement", statements.len(), out)?;
    for stmt in statements {
        write_statement(line.number(), stmt, out)?;
    }
    Ok(())
}

fn write_statement(line: LineNumber, stmt: &Statement, out: &mut Vec<u8>) -> Result<()> {
    match stmt {
        Statement::Let(_, var, expr) => {
            out.push(STMT_LET);
            write_string(var.name(), out)?;
            write_expression(line, expr, out)
        }
        Statement::Print(_, exprs, separators) => {
            // Only interior semicolons survive a decode.
            let trailing = !exprs.is_empty() && separators.len() >= exprs.len();
            if trailing || separators.contains(&Separator::Comma) {
                return Err(BinaryError::UnsupportedStatement(line, stmt.to_string()));
            }
            out.push(STMT_PRINT);
            write_u16_count("expression", exprs.len(), out)?;
            for expr in exprs {
                write_expression(line, expr, out)?;
            }
            Ok(())
        }
        Statement::For(pos, var, from, to, step) => {
            out.push(STMT_FOR);
            write_string(var.name(), out)?;
            write_expression(line, from, out)?;
            write_expression(line, to, out)?;
            match step {
                Some(step) => write_expression(line, step, out),
                None => write_expression(line, &Expression::Number(pos.clone(), 1.0), out),
            }
        }
        Statement::Next(_, var, _) => {
            out.push(STMT_NEXT);
            write_string(var.name(), out)
        }
        _ => Err(BinaryError::UnsupportedStatement(line, stmt.to_string())),
    }
}

fn write_expression(line: LineNumber, expr: &Expression, out: &mut Vec<u8>) -> Result<()> {
    match expr {
        Expression::Number(_, n) => {
            out.push(EXPR_NUMBER);
            out.extend_from_slice(&n.to_le_bytes());
        }
        Expression::String(_, s) => {
            out.push(EXPR_STRING);
            write_string(s, out)?;
        }
        Expression::Var(_, var) => {
            out.push(EXPR_IDENT);
            write_string(var.name(), out)?;
        }
        Expression::Prefix(_, op, rhs) => {
            out.push(EXPR_PREFIX);
            write_string(&op.to_string(), out)?;
            write_expression(line, rhs, out)?;
        }
        Expression::Infix(_, op, lhs, rhs) => {
            out.push(EXPR_INFIX);
            write_string(&op.to_string(), out)?;
            write_expression(line, lhs, out)?;
            write_expression(line, rhs, out)?;
        }
        Expression::Int(..) | Expression::Abs(..) | Expression::Sgn(..) => {
            return Err(BinaryError::UnsupportedExpression(line, expr.to_string()))
        }
    }
    Ok(())
}

fn write_string(value: &str, out: &mut Vec<u8>) -> Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| BinaryError::StringTooLong(value.len()))?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

fn write_u16_count(field: &'static str, count: usize, out: &mut Vec<u8>) -> Result<()> {
    let count = u16::try_from(count).map_err(|_| BinaryError::CountTooLarge(field, count))?;
    out.extend_from_slice(&count.to_le_bytes());
    Ok(())
}

struct Decoder<'a> {
    cursor: Cursor<'a>,
    for_lines: Vec<LineNumber>,
}

impl<'a> Decoder<'a> {
    fn line(&mut self) -> Result<Line> {
        let number = self.cursor.read_u16()?;
        let count = self.cursor.read_u16()?;
        let mut statements = Vec::with_capacity(count as usize);
        for _ in 0..count {
            statements.push(self.statement(number)?);
        }
        Ok(Line::new(number, statements))
    }

    fn statement(&mut self, line: LineNumber) -> Result<Statement> {
        let op = self.cursor.read_u8()?;
        match op {
            STMT_LET => {
                let name = self.cursor.read_string()?;
                let expr = self.expression(line)?;
                Ok(Statement::Let(
                    Pos::new(line, 0, &name),
                    Ident::from(name.as_str()),
                    expr,
                ))
            }
            STMT_PRINT => {
                let count = self.cursor.read_u16()?;
                let mut exprs = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    exprs.push(self.expression(line)?);
                }
                let separators = vec![Separator::Semicolon; exprs.len().saturating_sub(1)];
                Ok(Statement::Print(
                    Pos::new(line, 0, "PRINT"),
                    exprs,
                    separators,
                ))
            }
            STMT_FOR => {
                let name = self.cursor.read_string()?;
                let from = self.expression(line)?;
                let to = self.expression(line)?;
                let step = self.expression(line)?;
                self.for_lines.push(line);
                Ok(Statement::For(
                    Pos::new(line, 0, "FOR"),
                    Ident::from(name.as_str()),
                    from,
                    to,
                    Some(step),
                ))
            }
            STMT_NEXT => {
                let name = self.cursor.read_string()?;
                let for_line = self
                    .for_lines
                    .pop()
                    .ok_or(BinaryError::NextWithoutFor(line))?;
                Ok(Statement::Next(
                    Pos::new(line, 0, "NEXT"),
                    Ident::from(name.as_str()),
                    for_line,
                ))
            }
            _ => Err(BinaryError::InvalidStatementOpcode(op)),
        }
    }

    fn expression(&mut self, line: LineNumber) -> Result<Expression> {
        let op = self.cursor.read_u8()?;
        match op {
            EXPR_NUMBER => {
                let n = self.cursor.read_f64()?;
                Ok(Expression::Number(
                    Pos::new(line, 0, &format_number(n)),
                    n,
                ))
            }
            EXPR_STRING => {
                let s = self.cursor.read_string()?;
                Ok(Expression::String(Pos::new(line, 0, &s), s.as_str().into()))
            }
            EXPR_IDENT => {
                let name = self.cursor.read_string()?;
                Ok(Expression::Var(
                    Pos::new(line, 0, &name),
                    Ident::from(name.as_str()),
                ))
            }
            EXPR_PREFIX => {
                let (pos, op) = self.operator(line)?;
                let rhs = self.expression(line)?;
                Ok(Expression::Prefix(pos, op, Box::new(rhs)))
            }
            EXPR_INFIX => {
                let (pos, op) = self.operator(line)?;
                let lhs = self.expression(line)?;
                let rhs = self.expression(line)?;
                Ok(Expression::Infix(pos, op, Box::new(lhs), Box::new(rhs)))
            }
            _ => Err(BinaryError::InvalidExpressionOpcode(op)),
        }
    }

    fn operator(&mut self, line: LineNumber) -> Result<(Pos, Operator)> {
        let symbol = self.cursor.read_string()?;
        match Operator::from_symbol(&symbol) {
            Some(op) => Ok((Pos::new(line, 0, &symbol), op)),
            None => Err(BinaryError::InvalidOperator(symbol)),
        }
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn is_eof(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    fn rest(&mut self) -> &'a [u8] {
        let rest = &self.bytes[self.offset.min(self.bytes.len())..];
        self.offset = self.bytes.len();
        rest
    }

    fn read_u8(&mut self) -> Result<u8> {
        let value = self
            .bytes
            .get(self.offset)
            .ok_or(BinaryError::UnexpectedEof)?;
        self.offset += 1;
        Ok(*value)
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_exact_array::<2>()?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_exact_array::<4>()?))
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_exact_array::<8>()?))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_exact(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| BinaryError::InvalidUtf8)
    }

    fn read_exact_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_exact(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or(BinaryError::UnexpectedEof)?;
        if end > self.bytes.len() {
            return Err(BinaryError::UnexpectedEof);
        }
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }
}
