use super::ast::Statement;
use super::LineNumber;

/// One numbered program line. A line may hold no statements at all.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: LineNumber,
    statements: Vec<Statement>,
}

impl Line {
    pub fn new(number: LineNumber, statements: Vec<Statement>) -> Line {
        Line { number, statements }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.number)?;
        for (i, stmt) in self.statements.iter().enumerate() {
            if i == 0 {
                write!(f, " {}", stmt)?;
            } else {
                write!(f, ":{}", stmt)?;
            }
        }
        Ok(())
    }
}

/// Parsed program: lines in source order.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    lines: Vec<Line>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<Line>> for Program {
    fn from(lines: Vec<Line>) -> Program {
        Program { lines }
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
