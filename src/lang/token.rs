use std::convert::TryFrom;

/// A single lexeme with its physical position in the source text.
/// `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: Kind,
    pub literal: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: Kind, literal: &str, line: usize, column: usize) -> Token {
        Token {
            kind,
            literal: literal.to_string(),
            line,
            column,
        }
    }

    pub fn is_word(&self, word: Word) -> bool {
        self.kind == Kind::Keyword(word)
    }

    /// `:`, end of line, end of file or `ELSE` all terminate a statement.
    pub fn ends_statement(&self) -> bool {
        matches!(
            self.kind,
            Kind::Colon | Kind::Eol | Kind::Eof | Kind::Keyword(Word::Else)
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:>4}:{:<3} {:<12} {:?}",
            self.line,
            self.column,
            self.kind.to_string(),
            self.literal
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Illegal,
    Eof,
    Eol,
    LineNum,
    Number,
    String,
    Ident,
    Keyword(Word),
    Plus,
    Minus,
    Asterisk,
    Slash,
    Caret,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Kind::*;
        match self {
            Illegal => write!(f, "ILLEGAL"),
            Eof => write!(f, "EOF"),
            Eol => write!(f, "EOL"),
            LineNum => write!(f, "LINENUM"),
            Number => write!(f, "NUMBER"),
            String => write!(f, "STRING"),
            Ident => write!(f, "IDENT"),
            Keyword(_) => write!(f, "KEYWORD"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Asterisk => write!(f, "*"),
            Slash => write!(f, "/"),
            Caret => write!(f, "^"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Abs,
    Asc,
    Call,
    Chr,
    Color,
    Cos,
    Data,
    Dim,
    Else,
    End,
    Flash,
    For,
    Get,
    Gosub,
    Goto,
    Gr,
    Hcolor,
    Hgr,
    Home,
    Hplot,
    Htab,
    If,
    Input,
    Int,
    Inverse,
    Left,
    Len,
    Let,
    Mid,
    Next,
    Normal,
    Peek,
    Plot,
    Poke,
    Print,
    Read,
    Rem,
    Restore,
    Return,
    Right,
    Rnd,
    Sgn,
    Sin,
    Sqr,
    Step,
    Stop,
    Str,
    Tan,
    Text,
    Then,
    To,
    Val,
    Vtab,
}

const WORDS: &[Word] = &[
    Word::Abs,
    Word::Asc,
    Word::Call,
    Word::Chr,
    Word::Color,
    Word::Cos,
    Word::Data,
    Word::Dim,
    Word::Else,
    Word::End,
    Word::Flash,
    Word::For,
    Word::Get,
    Word::Gosub,
    Word::Goto,
    Word::Gr,
    Word::Hcolor,
    Word::Hgr,
    Word::Home,
    Word::Hplot,
    Word::Htab,
    Word::If,
    Word::Input,
    Word::Int,
    Word::Inverse,
    Word::Left,
    Word::Len,
    Word::Let,
    Word::Mid,
    Word::Next,
    Word::Normal,
    Word::Peek,
    Word::Plot,
    Word::Poke,
    Word::Print,
    Word::Read,
    Word::Rem,
    Word::Restore,
    Word::Return,
    Word::Right,
    Word::Rnd,
    Word::Sgn,
    Word::Sin,
    Word::Sqr,
    Word::Step,
    Word::Stop,
    Word::Str,
    Word::Tan,
    Word::Text,
    Word::Then,
    Word::To,
    Word::Val,
    Word::Vtab,
];

impl Word {
    /// Statements and functions this interpreter actually implements.
    pub fn is_supported(self) -> bool {
        use Word::*;
        matches!(
            self,
            Abs | Else
                | End
                | For
                | Get
                | Gosub
                | Goto
                | Home
                | Htab
                | If
                | Input
                | Int
                | Let
                | Next
                | Print
                | Rem
                | Return
                | Sgn
                | Step
                | Then
                | To
                | Vtab
        )
    }
}

impl TryFrom<&str> for Word {
    type Error = ();
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        WORDS
            .iter()
            .copied()
            .find(|w| w.to_string() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Abs => write!(f, "ABS"),
            Asc => write!(f, "ASC"),
            Call => write!(f, "CALL"),
            Chr => write!(f, "CHR$"),
            Color => write!(f, "COLOR"),
            Cos => write!(f, "COS"),
            Data => write!(f, "DATA"),
            Dim => write!(f, "DIM"),
            Else => write!(f, "ELSE"),
            End => write!(f, "END"),
            Flash => write!(f, "FLASH"),
            For => write!(f, "FOR"),
            Get => write!(f, "GET"),
            Gosub => write!(f, "GOSUB"),
            Goto => write!(f, "GOTO"),
            Gr => write!(f, "GR"),
            Hcolor => write!(f, "HCOLOR"),
            Hgr => write!(f, "HGR"),
            Home => write!(f, "HOME"),
            Hplot => write!(f, "HPLOT"),
            Htab => write!(f, "HTAB"),
            If => write!(f, "IF"),
            Input => write!(f, "INPUT"),
            Int => write!(f, "INT"),
            Inverse => write!(f, "INVERSE"),
            Left => write!(f, "LEFT$"),
            Len => write!(f, "LEN"),
            Let => write!(f, "LET"),
            Mid => write!(f, "MID$"),
            Next => write!(f, "NEXT"),
            Normal => write!(f, "NORMAL"),
            Peek => write!(f, "PEEK"),
            Plot => write!(f, "PLOT"),
            Poke => write!(f, "POKE"),
            Print => write!(f, "PRINT"),
            Read => write!(f, "READ"),
            Rem => write!(f, "REM"),
            Restore => write!(f, "RESTORE"),
            Return => write!(f, "RETURN"),
            Right => write!(f, "RIGHT$"),
            Rnd => write!(f, "RND"),
            Sgn => write!(f, "SGN"),
            Sin => write!(f, "SIN"),
            Sqr => write!(f, "SQR"),
            Step => write!(f, "STEP"),
            Stop => write!(f, "STOP"),
            Str => write!(f, "STR$"),
            Tan => write!(f, "TAN"),
            Text => write!(f, "TEXT"),
            Then => write!(f, "THEN"),
            To => write!(f, "TO"),
            Val => write!(f, "VAL"),
            Vtab => write!(f, "VTAB"),
        }
    }
}
