//! Menu Controller
//! Blocking read-dispatch loop over an injected input, output and runner.

use crate::analysis::{ComparisonError, ComparisonRunner};
use crate::menu::choice::{menu_text, MenuChoice, EXIT_MESSAGE, INVALID_CHOICE, PROMPT};
use crate::stats::AggregateError;
use std::io::{self, BufRead, Write};

/// Text menu driving the comparisons until the user exits.
pub struct MenuController<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> MenuController<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Loop until "0" or end of input.
    ///
    /// Comparison failures are reported and the loop continues; only I/O
    /// errors on the menu streams end it early.
    pub fn run<C: ComparisonRunner + ?Sized>(&mut self, runner: &mut C) -> io::Result<()> {
        loop {
            write!(self.output, "{}{}", menu_text(), PROMPT)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                writeln!(self.output, "{EXIT_MESSAGE}")?;
                return Ok(());
            }

            match MenuChoice::parse(&line) {
                MenuChoice::Exit => {
                    writeln!(self.output, "{EXIT_MESSAGE}")?;
                    return Ok(());
                }
                MenuChoice::Invalid(input) => {
                    tracing::debug!(input = %input, "Invalid menu choice");
                    writeln!(self.output, "{INVALID_CHOICE}")?;
                }
                MenuChoice::Run(comparison) => match runner.run(comparison) {
                    Ok(path) => {
                        writeln!(self.output, "Chart saved to {}", path.display())?;
                    }
                    Err(ComparisonError::Aggregate(AggregateError::MissingColumns(columns))) => {
                        tracing::warn!(?comparison, ?columns, "Comparison aborted");
                        writeln!(self.output, "Error: Required columns are missing.")?;
                        writeln!(self.output, "  Missing: {}", columns.join(", "))?;
                    }
                    Err(e) => {
                        tracing::warn!(?comparison, error = %e, "Comparison failed");
                        writeln!(self.output, "Error: {e}")?;
                    }
                },
            }
        }
    }
}
