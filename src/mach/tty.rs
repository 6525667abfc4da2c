use super::Device;
use std::io::{BufRead, Write};
use tracing::warn;

/// ## Line terminal
///
/// Output is held until `render`, which the runtime calls at the end of
/// every execution slice and before reading input.

pub struct Tty<R, W> {
    reader: R,
    writer: W,
    pending: String,
    ansi: bool,
}

impl<R: BufRead, W: Write> Tty<R, W> {
    pub fn new(reader: R, writer: W) -> Tty<R, W> {
        Tty {
            reader,
            writer,
            pending: String::new(),
            ansi: false,
        }
    }

    /// Emit ANSI escapes for `HOME`, `HTAB` and `VTAB`.
    pub fn with_ansi(mut self, ansi: bool) -> Tty<R, W> {
        self.ansi = ansi;
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> Device for Tty<R, W> {
    fn print_string(&mut self, s: &str) {
        self.pending.push_str(s);
    }

    fn clear(&mut self) {
        self.pending.clear();
        if self.ansi {
            self.pending.push_str("\x1b[2J\x1b[H");
        }
    }

    fn set_cursor_x(&mut self, x: i64) {
        if self.ansi {
            self.pending.push_str(&format!("\x1b[{}G", x.max(0) + 1));
        }
    }

    fn set_cursor_y(&mut self, y: i64) {
        if self.ansi {
            self.pending.push_str(&format!("\x1b[{}d", y.max(0) + 1));
        }
    }

    fn render(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self
            .writer
            .write_all(self.pending.as_bytes())
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            warn!(error = %e, "tty write failed");
        }
        self.pending.clear();
    }

    fn read_line(&mut self) -> Option<String> {
        self.render();
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
            Err(e) => {
                warn!(error = %e, "tty read failed");
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
                    warn!(error = %e, "tty read failed");
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
