//! Prompt loop driver
//!
//! Generic retry-until-valid interaction wrapper used by every resolver.
//! The driver owns the prompt/read/validate cycle; it never terminates the
//! process. Validation failures are printed and re-asked, by default
//! forever (an optional attempt bound can be configured).

use crate::error::{PromptError, ValidationError};
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// Interactive prompt driver over arbitrary input/output streams.
///
/// Generic over the streams so tests can script the whole conversation
/// with in-memory buffers.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: Option<u32>,
}

impl Prompter<BufReader<Stdin>, Stdout> {
    /// Driver over the real terminal streams.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_attempts: None,
        }
    }

    /// Bound the number of invalid answers before giving up.
    ///
    /// Unset by default: bad input re-prompts forever.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Ask until `validate` accepts the entered line.
    ///
    /// The validator receives the line without its trailing newline but
    /// otherwise verbatim. On rejection the reason is printed and the
    /// question is asked again.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        mut validate: impl FnMut(&str) -> Result<T, ValidationError>,
    ) -> Result<T, PromptError> {
        let mut failures = 0u32;

        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::Closed);
            }
            let raw = line.trim_end_matches(['\r', '\n']);

            match validate(raw) {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    writeln!(self.output, "{reason}")?;
                    failures += 1;
                    if let Some(max) = self.max_attempts {
                        if failures >= max {
                            return Err(PromptError::AttemptsExhausted);
                        }
                    }
                }
            }
        }
    }

    /// Present a numbered menu and return the chosen 0-based index.
    pub fn choose(&mut self, title: &str, options: &[&str]) -> Result<usize, PromptError> {
        let mut message = String::from(title);
        message.push('\n');
        for (index, option) in options.iter().enumerate() {
            message.push_str(&format!("{}) {}\n", index + 1, option));
        }
        message.push_str("Your choice: ");

        let count = options.len();
        let index = self.ask(&message, |raw| match raw.trim().parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
            _ => Err(ValidationError::InvalidChoice),
        })?;

        writeln!(self.output, "Selected: {}", options[index])?;
        Ok(index)
    }
}
