use super::{ast::Pos, LineNumber};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: Option<LineNumber>,
    column: usize,
    token: String,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$pos:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at($pos)
    };
    ($err:ident, ..$pos:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at($pos)
            .message($msg)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            column: 0,
            token: String::new(),
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn detail(&self) -> &str {
        &self.message
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: Some(line),
            ..self
        }
    }

    /// Attach a line number only when the error has none yet.
    pub fn or_line_number(self, line: LineNumber) -> Error {
        if self.line_number.is_some() {
            self
        } else {
            self.in_line_number(line)
        }
    }

    pub fn at(self, pos: &Pos) -> Error {
        Error {
            line_number: Some(pos.line),
            column: pos.column,
            token: pos.token.to_string(),
            ..self
        }
    }

    pub fn with_token(self, column: usize, token: &str) -> Error {
        Error {
            column,
            token: token.to_string(),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.into(),
            ..self
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NextWithoutFor = 1,
    SyntaxError = 2,
    ReturnWithoutGosub = 3,
    Overflow = 6,
    OutOfMemory = 7,
    UndefinedLine = 8,
    DivisionByZero = 11,
    TypeMismatch = 13,
    MissingNext = 26,
    InternalError = 51,
    UndefinedVariable = 100,
    DuplicateLineNumber = 101,
    StepCannotBeZero = 102,
}

impl ErrorCode {
    pub fn kind(self) -> ErrorKind {
        match self {
            ErrorCode::SyntaxError => ErrorKind::Syntax,
            _ => ErrorKind::Semantic,
        }
    }

    // The detail of these codes is the operand itself, e.g. UNDEFINED LINE 100.
    fn names_operand(self) -> bool {
        matches!(self, ErrorCode::UndefinedLine | ErrorCode::UndefinedVariable)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let s = match self {
            NextWithoutFor => "NEXT WITHOUT FOR",
            SyntaxError => "SYNTAX ERROR",
            ReturnWithoutGosub => "RETURN WITHOUT GOSUB",
            Overflow => "OVERFLOW",
            OutOfMemory => "OUT OF MEMORY",
            UndefinedLine => "UNDEFINED LINE",
            DivisionByZero => "DIVISION BY ZERO",
            TypeMismatch => "TYPE MISMATCH",
            MissingNext => "MISSING NEXT",
            InternalError => "INTERNAL ERROR",
            UndefinedVariable => "UNDEFINED VARIABLE",
            DuplicateLineNumber => "DUPLICATE LINE NUMBER",
            StepCannotBeZero => "STEP CANNOT BE ZERO",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if !self.message.is_empty() {
            if self.code.names_operand() {
                write!(f, " {}", self.message)?;
            } else {
                write!(f, ": {}", self.message)?;
            }
        }
        if let Some(line_number) = self.line_number {
            write!(f, " IN {} ({})", line_number, self.token)?;
        }
        Ok(())
    }
}
