//! Interactive input seam.
//!
//! Every prompt in the core goes through [`Console`], so the menus can be
//! driven from a terminal in the binary and from canned input in tests.

use crate::error::WeatherError;

pub trait Console {
    /// Print one line of output.
    fn show(&mut self, line: &str);

    /// Block until the user enters a line. Errors mean the input channel is gone.
    fn read_line(&mut self, prompt: &str) -> Result<String, WeatherError>;

    /// Yes/no question; only an answer starting with `y` counts as yes.
    fn confirm(&mut self, prompt: &str) -> Result<bool, WeatherError> {
        let answer = self.read_line(prompt)?;
        Ok(answer.trim().to_lowercase().starts_with('y'))
    }
}

/// Show `options` as a 1-indexed menu and return the 0-based index picked.
///
/// Non-numeric and out-of-range answers re-prompt without limit; only a
/// failing [`Console::read_line`] ends the loop. An empty `options` slice is
/// [`WeatherError::NoChoices`] and nothing is shown.
pub fn select_index<C: Console + ?Sized>(
    console: &mut C,
    title: &str,
    options: &[String],
) -> Result<usize, WeatherError> {
    if options.is_empty() {
        return Err(WeatherError::NoChoices);
    }

    console.show("");
    console.show(title);
    for (i, option) in options.iter().enumerate() {
        console.show(&format!("    ({}) {option}", i + 1));
    }

    loop {
        let answer = console.read_line("Enter a number: ")?;
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
            Ok(_) => console.show(&format!(
                "Please choose a number between 1 and {}.",
                options.len()
            )),
            Err(_) => console.show("Please enter a number."),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers and records everything shown.
    #[derive(Debug, Default)]
    pub struct ScriptedConsole {
        answers: VecDeque<String>,
        pub output: Vec<String>,
        pub prompts: usize,
    }

    impl ScriptedConsole {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: answers.into_iter().map(Into::into).collect(),
                ..Self::default()
            }
        }

        pub fn transcript(&self) -> String {
            self.output.join("\n")
        }
    }

    impl Console for ScriptedConsole {
        fn show(&mut self, line: &str) {
            self.output.push(line.to_string());
        }

        fn read_line(&mut self, _prompt: &str) -> Result<String, WeatherError> {
            self.prompts += 1;
            self.answers.pop_front().ok_or(WeatherError::Interrupted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedConsole;
    use super::*;

    fn options() -> Vec<String> {
        vec!["alpha".into(), "beta".into(), "gamma".into()]
    }

    #[test]
    fn valid_choice_returns_zero_based_index() {
        let mut console = ScriptedConsole::new(["2"]);
        assert_eq!(select_index(&mut console, "Pick", &options()).unwrap(), 1);
        assert!(console.transcript().contains("    (1) alpha"));
        assert!(console.transcript().contains("    (3) gamma"));
    }

    #[test]
    fn bad_input_reprompts_until_valid() {
        let mut console = ScriptedConsole::new(["abc", "0", "4", "", " 3 "]);
        assert_eq!(select_index(&mut console, "Pick", &options()).unwrap(), 2);
        assert_eq!(console.prompts, 5);
        assert!(console.transcript().contains("Please enter a number."));
        assert!(console.transcript().contains("between 1 and 3"));
    }

    #[test]
    fn closed_input_ends_the_loop() {
        let mut console = ScriptedConsole::new(["nope"]);
        let err = select_index(&mut console, "Pick", &options()).unwrap_err();
        assert!(matches!(err, WeatherError::Interrupted));
    }

    #[test]
    fn empty_options_fail_without_prompting() {
        let mut console = ScriptedConsole::new(["1"]);
        let err = select_index(&mut console, "Pick", &[]).unwrap_err();
        assert!(matches!(err, WeatherError::NoChoices));
        assert_eq!(console.prompts, 0);
        assert!(console.output.is_empty());
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut console = ScriptedConsole::new(["y", "Yes", "n", ""]);
        assert!(console.confirm("?").unwrap());
        assert!(console.confirm("?").unwrap());
        assert!(!console.confirm("?").unwrap());
        assert!(!console.confirm("?").unwrap());
    }
}
