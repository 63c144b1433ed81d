use crate::domain::ports::Confirmation;
use std::io::{BufRead, Write};

/// Answers every question the same way. Backs `--yes` and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer {
    answer: bool,
}

impl FixedAnswer {
    pub fn new(answer: bool) -> Self {
        Self { answer }
    }
}

impl Confirmation for FixedAnswer {
    fn confirm(&mut self, prompt: &str) -> bool {
        tracing::debug!("Auto-answering '{}' with {}", prompt, self.answer);
        self.answer
    }
}

/// Asks on `output` and reads a single line from `input`.
///
/// Only `y` or `yes` (any case) confirm. End of input declines.
pub struct LinePrompt<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> LinePrompt<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmation for LinePrompt<'_, R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{} [y/N] ", prompt)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&line),
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
