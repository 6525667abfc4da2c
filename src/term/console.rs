use basic::mach::Device;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use mortal::{Event, Key, PrepareConfig, Terminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// ## Interactive terminal
///
/// `INPUT` lines are edited with linefeed; the text printed since the last
/// newline becomes the edit prompt. `GET` reads one raw key with mortal.

pub struct Console {
    interface: Interface<DefaultTerminal>,
    pending: String,
    interrupted: Arc<AtomicBool>,
}

impl Console {
    pub fn new(interrupted: Arc<AtomicBool>) -> std::io::Result<Console> {
        let interface = Interface::new("BASIC")?;
        interface.set_report_signal(Signal::Interrupt, true);
        Ok(Console {
            interface,
            pending: String::new(),
            interrupted,
        })
    }

    fn write(&mut self, s: &str) {
        if let Err(e) = self.interface.write_fmt(format_args!("{}", s)) {
            warn!(error = %e, "console write failed");
        }
    }
}

impl Device for Console {
    fn print_string(&mut self, s: &str) {
        self.pending.push_str(s);
    }

    fn clear(&mut self) {
        self.pending.push_str("\x1b[2J\x1b[H");
    }

    fn set_cursor_x(&mut self, x: i64) {
        self.pending.push_str(&format!("\x1b[{}G", x.max(0) + 1));
    }

    fn set_cursor_y(&mut self, y: i64) {
        self.pending.push_str(&format!("\x1b[{}d", y.max(0) + 1));
    }

    fn render(&mut self) {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.write(&pending);
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let split = self.pending.rfind('\n').map_or(0, |i| i + 1);
        let prompt = self.pending.split_off(split);
        self.render();
        if let Err(e) = self.interface.set_prompt(&prompt) {
            warn!(error = %e, "console prompt failed");
        }
        match self.interface.read_line() {
            Ok(ReadResult::Input(line)) => {
                self.interface.add_history_unique(line.clone());
                Some(line)
            }
            Ok(ReadResult::Signal(Signal::Interrupt)) => {
                self.interrupted.store(true, Ordering::SeqCst);
                None
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "console read failed");
                None
            }
        }
    }

    fn get_char(&mut self) -> Option<char> {
        self.render();
        let terminal = match Terminal::new() {
            Ok(terminal) => terminal,
            Err(e) => {
                warn!(error = %e, "terminal unavailable");
                return None;
            }
        };
        let state = match terminal.prepare(PrepareConfig::default()) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "terminal prepare failed");
                return None;
            }
        };
        let key = loop {
            match terminal.read_event(None) {
                Ok(Some(Event::Key(Key::Char(ch)))) => break Some(ch),
                Ok(Some(Event::Key(Key::Enter))) => break Some('\r'),
                Ok(Some(Event::Key(Key::Ctrl('c')))) | Ok(Some(Event::Signal(_))) => {
                    self.interrupted.store(true, Ordering::SeqCst);
                    break None;
                }
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal read failed");
                    break None;
                }
            }
        };
        if let Err(e) = terminal.restore(state) {
            warn!(error = %e, "terminal restore failed");
        }
        key
    }
}
