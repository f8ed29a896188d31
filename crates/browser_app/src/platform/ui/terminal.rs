use std::io::{self, BufRead, Write};

use browser_core::{ErrorDialog, WebsiteEntry};

use super::input::{parse_choice, parse_command, Command, DialogChoice};
use super::render::{render_dialog, render_entries};

/// Line-oriented stand-in for the list screen and the alert dialog.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn display_entries(&mut self, entries: &[WebsiteEntry]) -> io::Result<()> {
        writeln!(self.output)?;
        for line in render_entries(entries) {
            writeln!(self.output, "{line}")?;
        }
        self.output.flush()
    }

    pub fn status(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Show the dialog and block until one of its buttons is chosen.
    /// `None` means the input was closed.
    pub fn show_error(&mut self, dialog: &ErrorDialog) -> io::Result<Option<DialogChoice>> {
        writeln!(self.output)?;
        for line in render_dialog(dialog) {
            writeln!(self.output, "{line}")?;
        }
        loop {
            let Some(line) = self.prompt("> ")? else {
                return Ok(None);
            };
            if let Some(choice) = parse_choice(&line, dialog.options) {
                return Ok(Some(choice));
            }
        }
    }

    /// Ask for the next list command. `None` means the input was closed.
    pub fn prompt_command(&mut self) -> io::Result<Option<Command>> {
        loop {
            let Some(line) = self.prompt("Open # / [r]eload / [q]uit > ")? else {
                return Ok(None);
            };
            match parse_command(&line) {
                Some(command) => return Ok(Some(command)),
                None => writeln!(self.output, "Unrecognised input: {}", line.trim())?,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
