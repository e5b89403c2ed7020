//! User input for the interactive menu

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Supplies answers to prompts
pub trait InputSource {
    /// Show `prompt` and read one answer, trimmed
    ///
    /// Returns `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Reads answers from a buffered reader, echoing prompts to a writer
pub struct LineInput<R: BufRead, W: Write> {
    reader: R,
    prompt_out: W,
}

impl LineInput<io::StdinLock<'static>, io::Stdout> {
    /// Input from the terminal
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> InputSource for LineInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.prompt_out, "{} ", prompt)?;
        self.prompt_out.flush()?;

        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            // Keep the shell prompt off our last line
            writeln!(self.prompt_out)?;
            return Ok(None);
        }

        Ok(Some(input.trim().to_string()))
    }
}

/// Canned answers, mainly for tests
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.answers.pop_front().map(|a| a.trim().to_string()))
    }
}
