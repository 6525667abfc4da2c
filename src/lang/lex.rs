use super::token::{Kind, Token, Word};
use super::{Error, LineNumber};
use crate::error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Scan BASIC source into tokens terminated by a single `Eof`.
pub fn lex(s: &str) -> Result<Vec<Token>> {
    let mut lexer = BasicLexer::new(s);
    let mut tokens: Vec<Token> = vec![];
    while let Some(token) = lexer.next() {
        if token.kind == Kind::Illegal {
            let error = match lexer.line_number {
                Some(line) => error!(SyntaxError, line; "ILLEGAL CHARACTER"),
                None => error!(SyntaxError; format!("ILLEGAL CHARACTER ON LINE {}", token.line)),
            };
            return Err(error.with_token(token.column, &token.literal));
        }
        tokens.push(token);
    }
    Ok(tokens)
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

struct BasicLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
    expect_line_number: bool,
    line_number: Option<LineNumber>,
    done: bool,
}

impl<'a> BasicLexer<'a> {
    fn new(s: &'a str) -> BasicLexer<'a> {
        BasicLexer {
            chars: s.chars().peekable(),
            line: 1,
            column: 1,
            expect_line_number: true,
            line_number: None,
            done: false,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn bump_if(&mut self, want: char) -> bool {
        if self.chars.peek() == Some(&want) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn whitespace(&mut self) {
        while let Some(&pk) = self.chars.peek() {
            if !is_basic_whitespace(pk) {
                break;
            }
            self.bump();
        }
    }

    fn number(&mut self) -> (Kind, String) {
        let mut s = String::new();
        let mut decimal = false;
        while let Some(&pk) = self.chars.peek() {
            if is_basic_digit(pk) || (!decimal && pk == '.') {
                decimal |= pk == '.';
                s.push(pk);
                self.bump();
            } else {
                break;
            }
        }
        if self.expect_line_number {
            self.line_number = s.parse().ok();
            (Kind::LineNum, s)
        } else {
            (Kind::Number, s)
        }
    }

    fn string(&mut self) -> (Kind, String) {
        let mut s = String::new();
        self.bump();
        while let Some(&pk) = self.chars.peek() {
            if pk == '\n' {
                break;
            }
            self.bump();
            if pk == '"' {
                break;
            }
            s.push(pk);
        }
        (Kind::String, s)
    }

    fn alphabetic(&mut self) -> (Kind, String) {
        let mut s = String::new();
        while let Some(&pk) = self.chars.peek() {
            if is_basic_alphabetic(pk) || is_basic_digit(pk) {
                s.push(pk.to_ascii_uppercase());
                self.bump();
            } else {
                break;
            }
        }
        if let Some(&pk) = self.chars.peek() {
            if pk == '$' || pk == '%' {
                s.push(pk);
                self.bump();
            }
        }
        match Word::try_from(s.as_str()) {
            Ok(Word::Rem) => {
                self.remark();
                (Kind::Keyword(Word::Rem), s)
            }
            Ok(word) => (Kind::Keyword(word), s),
            Err(_) => (Kind::Ident, s),
        }
    }

    fn remark(&mut self) {
        while let Some(&pk) = self.chars.peek() {
            if pk == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn minutia(&mut self, ch: char) -> (Kind, String) {
        self.bump();
        let kind = match ch {
            '+' => Kind::Plus,
            '-' => Kind::Minus,
            '*' => Kind::Asterisk,
            '/' => Kind::Slash,
            '^' => Kind::Caret,
            '=' => Kind::Equal,
            '(' => Kind::LParen,
            ')' => Kind::RParen,
            ',' => Kind::Comma,
            ';' => Kind::Semicolon,
            ':' => Kind::Colon,
            '?' => Kind::Keyword(Word::Print),
            '<' => {
                if self.bump_if('=') {
                    return (Kind::LessEqual, "<=".to_string());
                }
                if self.bump_if('>') {
                    return (Kind::NotEqual, "<>".to_string());
                }
                Kind::Less
            }
            '>' => {
                if self.bump_if('=') {
                    return (Kind::GreaterEqual, ">=".to_string());
                }
                Kind::Greater
            }
            _ => Kind::Illegal,
        };
        (kind, ch.to_string())
    }
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.whitespace();
        let (line, column) = (self.line, self.column);
        let pk = match self.chars.peek() {
            Some(&pk) => pk,
            None => {
                self.done = true;
                return Some(Token::new(Kind::Eof, "", line, column));
            }
        };
        if pk == '\n' {
            self.bump();
            self.expect_line_number = true;
            return Some(Token::new(Kind::Eol, "\n", line, column));
        }
        let (kind, literal) = if is_basic_digit(pk) || pk == '.' {
            self.number()
        } else if is_basic_alphabetic(pk) {
            self.alphabetic()
        } else if pk == '"' {
            self.string()
        } else {
            self.minutia(pk)
        };
        self.expect_line_number = false;
        Some(Token {
            kind,
            literal,
            line,
            column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<Kind> {
        lex(s).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_line_number_only_at_line_start() {
        use Kind::*;
        assert_eq!(
            kinds("10 PRINT 20\n20 END"),
            vec![
                LineNum,
                Keyword(Word::Print),
                Number,
                Eol,
                LineNum,
                Keyword(Word::End),
                Eof
            ]
        );
    }

    #[test]
    fn test_rem_discards_rest_of_line() {
        let tokens = lex("10 REM HELLO: PRINT \"X\"\n20 END").unwrap();
        assert_eq!(tokens[1].kind, Kind::Keyword(Word::Rem));
        assert_eq!(tokens[2].kind, Kind::Eol);
        assert_eq!(tokens[3].literal, "20");
    }

    #[test]
    fn test_positions() {
        let tokens = lex("10 A=1\n20 B$=\"X\"").unwrap();
        assert_eq!((tokens[1].line, tokens[1].column), (1, 4));
        assert_eq!(tokens[5].literal, "20");
        assert_eq!((tokens[6].line, tokens[6].column), (2, 4));
        assert_eq!(tokens[6].literal, "B$");
        assert_eq!(tokens[8].kind, Kind::String);
        assert_eq!(tokens[8].literal, "X");
    }

    #[test]
    fn test_illegal_character_aborts() {
        let e = lex("10 A=1\n20 B=@").unwrap_err();
        assert_eq!(e.line_number(), Some(20));
        assert_eq!(e.token(), "@");
    }
}
