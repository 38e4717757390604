use crossterm::{cursor, style, terminal, QueueableCommand};
use std::io::{self, Write};

/// Where each refreshed status frame goes.
pub trait DisplaySink: Send {
    fn show(&mut self, frame: &str) -> io::Result<()>;
}

/// Redraws the status block in place, erasing the previously drawn frame first.
pub struct TerminalSink<W: Write> {
    out: W,
    drawn_lines: u16,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, drawn_lines: 0 }
    }
}

impl<W: Write + Send> DisplaySink for TerminalSink<W> {
    fn show(&mut self, frame: &str) -> io::Result<()> {
        if self.drawn_lines > 0 {
            self.out.queue(cursor::MoveToPreviousLine(self.drawn_lines))?;
            self.out
                .queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        }
        self.out.queue(style::Print(frame))?;
        self.out.queue(style::Print("\n"))?;
        self.out.flush()?;

        self.drawn_lines = u16::try_from(frame.split('\n').count()).unwrap_or(u16::MAX);
        Ok(())
    }
}
