//! Interactive shell
//!
//! Reads commands line by line and writes responses, until EOF or `quit`.

use std::io::{BufRead, Write};

use crate::directory::Directory;
use crate::error::{DirectoryError, Result};
use crate::protocol::Command;
use crate::storage::Mirror;

/// Prompt printed before each command
pub const PROMPT: &str = "contactdex> ";

/// Drives a [`Directory`] from a line-oriented input
pub struct Shell<'d, M: Mirror> {
    directory: &'d mut Directory<M>,

    /// Print the prompt before each line (off for piped input)
    show_prompt: bool,
}

impl<'d, M: Mirror> Shell<'d, M> {
    pub fn new(directory: &'d mut Directory<M>) -> Self {
        Self {
            directory,
            show_prompt: true,
        }
    }

    pub fn show_prompt(mut self, show: bool) -> Self {
        self.show_prompt = show;
        self
    }

    /// Run until EOF or `quit`.
    ///
    /// Command errors and persistence failures are reported on `output`
    /// and the loop continues. Only I/O errors on `input`/`output` end it.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        let mut lines = input.lines();

        loop {
            if self.show_prompt {
                write!(output, "{}", PROMPT)?;
                output.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(output, "Error: {}", e)?;
                    continue;
                }
            };

            tracing::trace!("Executing {:?}", command.command_type());

            match self.directory.execute(command) {
                Ok(response) => {
                    writeln!(output, "{}", response)?;
                    if response.is_terminal() {
                        break;
                    }
                }
                Err(e @ DirectoryError::Io(_)) => return Err(e),
                Err(e) => writeln!(output, "Error: {}", e)?,
            }
        }

        output.flush()?;
        Ok(())
    }
}
