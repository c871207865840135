use std::io::{self, BufRead, IsTerminal, Write};

use climate_core::{Console, WeatherError};
use inquire::{Confirm, InquireError, Text};

/// Console backed by the process's stdin/stdout.
///
/// On a TTY prompts go through `inquire`; piped input is read line by line.
#[derive(Debug)]
pub struct TerminalConsole {
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn read_plain(&self, prompt: &str) -> Result<String, WeatherError> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(WeatherError::Interrupted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

/// Hint for plain yes/no prompts; `inquire::Confirm` renders its own.
fn yes_no_prompt(question: &str) -> String {
    format!("{} (y/n) ", question.trim_end())
}

fn map_inquire(err: InquireError) -> WeatherError {
    match err {
        InquireError::OperationInterrupted | InquireError::OperationCanceled => {
            WeatherError::Interrupted
        }
        InquireError::IO(e) => WeatherError::Input(e),
        other => WeatherError::Input(io::Error::other(other.to_string())),
    }
}

impl Console for TerminalConsole {
    fn show(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, WeatherError> {
        if !self.interactive {
            return self.read_plain(prompt);
        }
        Text::new(prompt).prompt().map_err(map_inquire)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, WeatherError> {
        if !self.interactive {
            let answer = self.read_plain(&yes_no_prompt(prompt))?;
            return Ok(answer.trim().to_lowercase().starts_with('y'));
        }
        Confirm::new(prompt)
            .with_default(false)
            .prompt()
            .map_err(map_inquire)
    }
}
