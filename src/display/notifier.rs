//! Status message rendering
//!
//! The menu and subcommands report everything through a `Notifier`, so the
//! same flow can print coloured text to a terminal or plain text into a
//! buffer under test.

use std::io::{self, Write};

use crossterm::style::Stylize;

/// How a message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Unstyled text (menus, tables)
    Plain,
    /// Neutral information such as a balance
    Info,
    /// An operation completed
    Success,
    /// An operation went through but something beside it failed
    Warning,
    /// An operation was rejected or failed
    Error,
    /// Section headers and the farewell
    Banner,
}

/// Sink for user-facing status messages
pub trait Notifier {
    fn notify(&mut self, level: Level, message: &str) -> io::Result<()>;

    fn plain(&mut self, message: &str) -> io::Result<()> {
        self.notify(Level::Plain, message)
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        self.notify(Level::Info, message)
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        self.notify(Level::Success, message)
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        self.notify(Level::Warning, message)
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        self.notify(Level::Error, message)
    }

    fn banner(&mut self, message: &str) -> io::Result<()> {
        self.notify(Level::Banner, message)
    }
}

/// Writes messages line by line, optionally coloured with ANSI styles
pub struct ConsoleNotifier<W: Write> {
    out: W,
    color: bool,
}

impl ConsoleNotifier<io::Stdout> {
    /// Notifier printing to standard output
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Consume the notifier and return the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn notify(&mut self, level: Level, message: &str) -> io::Result<()> {
        if !self.color {
            writeln!(self.out, "{}", message)?;
            return self.out.flush();
        }

        match level {
            Level::Plain => writeln!(self.out, "{}", message)?,
            Level::Info => writeln!(self.out, "{}", message.black().on_blue())?,
            Level::Success => writeln!(self.out, "{}", message.green())?,
            Level::Warning => writeln!(self.out, "{}", message.yellow())?,
            Level::Error => writeln!(self.out, "{}", message.black().on_red())?,
            Level::Banner => writeln!(self.out, "{}", message.black().on_green())?,
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_without_color() {
        let mut notifier = ConsoleNotifier::new(Vec::new(), false);
        notifier.success("done").unwrap();
        notifier.error("oops").unwrap();

        let out = String::from_utf8(notifier.into_inner()).unwrap();
        assert_eq!(out, "done\noops\n");
    }

    #[test]
    fn test_colored_output_keeps_text() {
        let mut notifier = ConsoleNotifier::new(Vec::new(), true);
        notifier.error("Insufficient funds.").unwrap();
        notifier.plain("menu").unwrap();

        let out = String::from_utf8(notifier.into_inner()).unwrap();
        assert!(out.contains("Insufficient funds."));
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(out.contains('\x1b'));
        }
        assert!(out.ends_with("menu\n"));
    }
}
