//! Terminal I/O used by the flows: plain output, line prompts, and the
//! "press any key" pause after listing devices.

use std::io::{BufRead, IsTerminal, Write};

use console::Term;
use dialoguer::Input;

use crate::error::{AdbiError, Result};

pub trait Interaction: Send {
    fn println(&mut self, line: &str);

    /// Prompt for one line of input. Empty answers are allowed.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Block until a single key is pressed.
    fn wait_for_key(&mut self) -> Result<()>;
}

pub struct Terminal {
    term: Term,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term() && std::io::stdin().is_terminal()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for Terminal {
    fn println(&mut self, line: &str) {
        println!("{}", line);
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if !self.is_interactive() {
            tracing::debug!("stdin is not a terminal, reading plain lines");
            let stdin = std::io::stdin();
            return read_plain_line(prompt, &mut std::io::stdout(), &mut stdin.lock());
        }

        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn wait_for_key(&mut self) -> Result<()> {
        if !self.is_interactive() {
            return Ok(());
        }
        self.term.read_key()?;
        Ok(())
    }
}

/// Line prompt for piped or redirected input. A closed input is an error.
fn read_plain_line(
    prompt: &str,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<String> {
    write!(out, "{}: ", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AdbiError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        )));
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_plain_line_strips_line_ending() {
        let mut out = Vec::new();
        let mut input = Cursor::new("1\r\n2\n");

        assert_eq!(read_plain_line("Select a device", &mut out, &mut input).unwrap(), "1");
        assert_eq!(read_plain_line("Select a device", &mut out, &mut input).unwrap(), "2");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Select a device: Select a device: "
        );
    }

    #[test]
    fn test_plain_line_without_newline() {
        let mut input = Cursor::new("0");
        let answer = read_plain_line("Select a device", &mut Vec::new(), &mut input).unwrap();
        assert_eq!(answer, "0");
    }

    #[test]
    fn test_plain_line_keeps_empty_answers() {
        let mut input = Cursor::new("\n");
        let answer = read_plain_line("Select a device", &mut Vec::new(), &mut input).unwrap();
        assert_eq!(answer, "");
    }

    #[test]
    fn test_plain_line_closed_input_is_error() {
        let mut input = Cursor::new("");
        let err = read_plain_line("Select a device", &mut Vec::new(), &mut input).unwrap_err();
        assert!(matches!(err, AdbiError::Io(ref e) if e.kind() == std::io::ErrorKind::UnexpectedEof));
    }
}
