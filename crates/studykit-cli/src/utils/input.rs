//! User input utilities for interactive command-line prompts.
//!
//! Commands never read stdin directly; they receive a [`Prompter`] so
//! tests and non-interactive callers can answer on the user's behalf.

use std::io::{self, BufRead, Write};

/// Asks the user yes/no questions.
pub trait Prompter: Send + Sync {
    /// Ask `question`; `Ok(true)` only on an explicit yes.
    fn confirm(&self, question: &str) -> io::Result<bool>;
}

/// Prompts on the terminal (stdout for the question, stdin for the answer).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn confirm(&self, question: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        prompt_confirmation(&mut stdin.lock(), &mut stdout.lock(), question)
    }
}

/// Prompts for a yes/no confirmation.
///
/// Accepts 'y', 'yes', 'n', 'no' (case insensitive). Empty input and end of
/// input are treated as 'no'; anything else re-prompts.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails.
pub fn prompt_confirmation<R, W>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{prompt} (y/N): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => writeln!(output, "Please enter 'y' for yes or 'n' for no.")?,
        }
    }
}
