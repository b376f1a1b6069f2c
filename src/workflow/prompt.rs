//! Prompt abstraction: yes/no, free text, secret text and multi-select.

use std::io::{BufRead, IsTerminal, Write};

use thiserror::Error;

/// Failures while asking the user something.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input closed before an answer was given")]
    Closed,
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Narrow interface the workflow uses to talk to the user.
pub trait Prompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError>;
    fn input(&mut self, prompt: &str) -> Result<String, PromptError>;
    /// Like [`Prompter::input`] but without echoing the answer.
    fn secret(&mut self, prompt: &str) -> Result<String, PromptError>;
    /// Indices of the chosen items. Line-based prompters keep the order the
    /// numbers were typed in; widget-based ones return them in list order.
    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>, PromptError>;
}

/// Line-based prompter for accessible mode and scripted input.
///
/// # Example
/// ```
/// use gh_purge::workflow::{PlainPrompter, Prompter};
///
/// let mut out = Vec::new();
/// let mut prompter = PlainPrompter::new(&b"y\n"[..], &mut out);
/// assert!(prompter.confirm("Proceed?", false)?);
/// # Ok::<(), gh_purge::workflow::PromptError>(())
/// ```
pub struct PlainPrompter<R, W> {
    input: R,
    output: W,
    // read secrets from the controlling terminal without echo
    hide_secrets: bool,
}

impl<R: BufRead, W: Write> PlainPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_secrets: false,
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl PlainPrompter<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompter on stdin/stderr. Secrets are read without echo when stdin
    /// is a terminal.
    pub fn stdio() -> Self {
        Self {
            hide_secrets: true,
            ..Self::new(std::io::stdin().lock(), std::io::stderr())
        }
    }
}

impl<R: BufRead, W: Write> Prompter for PlainPrompter<R, W> {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = self.ask(&format!("{prompt} {hint}"))?;
        Ok(match answer.trim().to_ascii_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }

    fn input(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.ask(&format!("{prompt}:"))
    }

    fn secret(&mut self, prompt: &str) -> Result<String, PromptError> {
        if self.hide_secrets && std::io::stdin().is_terminal() {
            write!(self.output, "{prompt}: ")?;
            self.output.flush()?;
            return Ok(console::Term::stderr().read_secure_line()?);
        }
        self.ask(&format!("{prompt}:"))
    }

    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>, PromptError> {
        writeln!(self.output, "{prompt}")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  {:>3}. {item}", i + 1)?;
        }
        loop {
            let answer = self.ask("Numbers to select (e.g. 1,3,5-7), empty for none:")?;
            match parse_selection(&answer, items.len()) {
                Ok(selection) => return Ok(selection),
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }
}

/// Parse `1,3,5-7` style input into zero-based indices, keeping entry order
/// and dropping repeats.
pub fn parse_selection(input: &str, len: usize) -> Result<Vec<usize>, String> {
    let mut picked = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (parse_index(a, len)?, parse_index(b, len)?),
            None => {
                let n = parse_index(part, len)?;
                (n, n)
            }
        };
        if start > end {
            return Err(format!("invalid range '{part}'"));
        }
        for index in start..=end {
            if !picked.contains(&index) {
                picked.push(index);
            }
        }
    }
    Ok(picked)
}

fn parse_index(raw: &str, len: usize) -> Result<usize, String> {
    let n: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw.trim()))?;
    if n == 0 || n > len {
        return Err(format!("{n} is out of range (1-{len})"));
    }
    Ok(n - 1)
}

#[cfg(feature = "cli")]
pub use terminal::TerminalPrompter;

#[cfg(feature = "cli")]
mod terminal {
    use dialoguer::theme::ColorfulTheme;
    use dialoguer::{Confirm, Input, MultiSelect, Password};

    use super::{PromptError, Prompter};

    impl From<dialoguer::Error> for PromptError {
        fn from(error: dialoguer::Error) -> Self {
            PromptError::Terminal(error.to_string())
        }
    }

    /// Interactive prompter rendering with dialoguer widgets.
    pub struct TerminalPrompter {
        theme: ColorfulTheme,
    }

    impl TerminalPrompter {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
            }
        }
    }

    impl Default for TerminalPrompter {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Prompter for TerminalPrompter {
        fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
            Ok(Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact()?)
        }

        fn input(&mut self, prompt: &str) -> Result<String, PromptError> {
            Ok(Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?)
        }

        fn secret(&mut self, prompt: &str) -> Result<String, PromptError> {
            Ok(Password::with_theme(&self.theme)
                .with_prompt(prompt)
                .interact()?)
        }

        fn multi_select(
            &mut self,
            prompt: &str,
            items: &[String],
        ) -> Result<Vec<usize>, PromptError> {
            Ok(MultiSelect::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(items)
                .max_length(15)
                .interact()?)
        }
    }
}
