//! The spinner's only point of contact with the terminal.

use console::Term;
use std::io::{self, Write};

/// Writes frames to the current terminal line and controls the cursor.
///
/// Implementations are moved onto the render thread, so they must be `Send`.
pub trait TerminalRenderer: Send {
    fn hide_cursor(&mut self) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;

    /// Overwrite the current line with `text`: `\r{text}`, no newline.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Blank out the current line and return to its start.
    fn clear_line(&mut self) -> io::Result<()>;

    /// Whether the output is an interactive terminal that supports
    /// line rewriting and cursor control.
    fn is_interactive(&self) -> bool {
        true
    }

    /// Write a full line once, for non-interactive output.
    fn write_plain(&mut self, text: &str) -> io::Result<()>;
}

/// Renderer backed by a `console::Term` (stdout or stderr).
pub struct TermRenderer {
    term: Term,
}

impl TermRenderer {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Columns available for the clear run. Writing a full-width run would
    /// wrap the cursor onto the next line, so one column is left free.
    fn clear_width(&self) -> usize {
        let (_rows, cols) = self.term.size();
        usize::from(cols).saturating_sub(1)
    }
}

impl TerminalRenderer for TermRenderer {
    fn hide_cursor(&mut self) -> io::Result<()> {
        self.term.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.term.show_cursor()
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        write!(self.term, "\r{}", text)?;
        self.term.flush()
    }

    fn clear_line(&mut self) -> io::Result<()> {
        let blank = clear_sequence(self.clear_width());
        self.term.write_all(blank.as_bytes())?;
        self.term.flush()
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }
}

/// `\r`, `width` spaces, `\r`.
pub fn clear_sequence(width: usize) -> String {
    format!("\r{}\r", " ".repeat(width))
}
