use super::Device;
use std::io::{BufRead, Write};
use tracing::warn;

pub const COLUMNS: usize = 40;
pub const ROWS: usize = 24;

/// ## Apple II text screen
///
/// A 40x24 grid of character cells. Printing wraps at the right edge and
/// scrolls at the bottom. `render` repaints the whole screen.

pub struct Text40<R, W> {
    reader: R,
    writer: W,
    cells: Vec<[char; COLUMNS]>,
    x: usize,
    y: usize,
    ansi: bool,
}

impl<R: BufRead, W: Write> Text40<R, W> {
    pub fn new(reader: R, writer: W) -> Text40<R, W> {
        Text40 {
            reader,
            writer,
            cells: vec![[' '; COLUMNS]; ROWS],
            x: 0,
            y: 0,
            ansi: false,
        }
    }

    pub fn with_ansi(mut self, ansi: bool) -> Text40<R, W> {
        self.ansi = ansi;
        self
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Row text without trailing blanks.
    pub fn row(&self, y: usize) -> String {
        match self.cells.get(y) {
            Some(row) => row.iter().collect::<String>().trim_end().to_string(),
            None => String::new(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn put(&mut self, ch: char) {
        if ch == '\n' {
            self.newline();
            return;
        }
        self.cells[self.y][self.x] = ch;
        self.x += 1;
        if self.x == COLUMNS {
            self.newline();
        }
    }

    fn newline(&mut self) {
        self.x = 0;
        self.y += 1;
        if self.y == ROWS {
            self.cells.remove(0);
            self.cells.push([' '; COLUMNS]);
            self.y = ROWS - 1;
        }
    }
}

impl<R: BufRead, W: Write> Device for Text40<R, W> {
    fn print_string(&mut self, s: &str) {
        for ch in s.chars() {
            self.put(ch);
        }
    }

    fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            *row = [' '; COLUMNS];
        }
        self.x = 0;
        self.y = 0;
    }

    fn set_cursor_x(&mut self, x: i64) {
        self.x = x.max(0).min(COLUMNS as i64 - 1) as usize;
    }

    fn set_cursor_y(&mut self, y: i64) {
        self.y = y.max(0).min(ROWS as i64 - 1) as usize;
    }

    fn render(&mut self) {
        let mut frame = String::new();
        if self.ansi {
            frame.push_str("\x1b[H");
        }
        for (y, row) in self.cells.iter().enumerate() {
            if self.ansi {
                frame.extend(row.iter());
                frame.push_str("\r\n");
            } else {
                frame.push_str(&self.row(y));
                frame.push('\n');
            }
        }
        if self.ansi {
            frame.push_str(&format!("\x1b[{};{}H", self.y + 1, self.x + 1));
        }
        let result = self
            .writer
            .write_all(frame.as_bytes())
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            warn!(error = %e, "screen write failed");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        self.render();
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let line = line.trim_end_matches(&['\r', '\n'][..]).to_string();
                self.print_string(&line);
                self.put('\n');
                Some(line)
            }
            Err(e) => {
                warn!(error = %e, "keyboard read failed");
                None
            }
        }
    }

    fn get_char(&mut self) -> Option<char> {
        self.render();
        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buf) if !buf.is_empty() => buf[0],
                Ok(_) => return None,
                Err(e) => {
                    warn!(error = %e, "keyboard read failed");
                    return None;
                }
            };
            self.reader.consume(1);
            if byte != b'\r' && byte != b'\n' {
                return Some(byte as char);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Text40<&'static [u8], Vec<u8>> {
        Text40::new(&b""[..], Vec::new())
    }

    #[test]
    fn test_wraps_at_forty_columns() {
        let mut s = screen();
        s.print_string(&"A".repeat(42));
        assert_eq!(s.row(0), "A".repeat(40));
        assert_eq!(s.row(1), "AA");
        assert_eq!(s.cursor(), (2, 1));
    }

    #[test]
    fn test_scrolls_at_bottom() {
        let mut s = screen();
        for i in 0..25 {
            s.print_string(&format!("{}\n", i));
        }
        assert_eq!(s.row(0), "2");
        assert_eq!(s.row(22), "24");
        assert_eq!(s.cursor(), (0, 23));
    }

    #[test]
    fn test_tabs_clamp_and_home_clears() {
        let mut s = screen();
        s.set_cursor_x(100);
        s.set_cursor_y(-3);
        assert_eq!(s.cursor(), (39, 0));
        s.print_string("X");
        assert_eq!(s.row(0), format!("{}X", " ".repeat(39)));
        s.clear();
        assert_eq!(s.row(0), "");
        assert_eq!(s.cursor(), (0, 0));
    }

    #[test]
    fn test_render_plain_frame() {
        let mut s = screen();
        s.print_string("HI");
        s.render();
        let frame = String::from_utf8(s.writer().clone()).unwrap();
        assert!(frame.starts_with("HI\n\n"));
        assert_eq!(frame.lines().count(), ROWS);
    }
}
