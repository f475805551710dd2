//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_choice, display_error, display_outcome,
    display_repository_overview, display_status, display_step_error, display_success,
    display_title,
};

/// Line-based prompts over any reader/writer pair.
///
/// The binary uses [Prompter::stdio]; tests feed scripted input.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompts on the process's stdin/stdout
    pub fn stdio() -> Self {
        Prompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompts user to pick one of `options`, returning its index.
    ///
    /// If only one option is available, returns it directly without prompting.
    /// Otherwise displays a numbered list and accepts a 1-based index.
    /// Default selection is the first option if the user presses Enter.
    ///
    /// # Returns
    /// * `Ok(usize)` - Index into `options`
    /// * `Err` - If `options` is empty or the selection is invalid
    pub fn select(&mut self, title: &str, options: &[String]) -> Result<usize> {
        match options.len() {
            0 => return Err(anyhow::anyhow!("Nothing to choose from for: {}", title)),
            1 => return Ok(0),
            _ => {}
        }

        writeln!(self.output, "\n{}", console::style(title).bold())?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, option)?;
        }

        write!(
            self.output,
            "\nSelect an option (1-{}) [default: 1]: ",
            options.len()
        )?;
        self.output.flush()?;

        let selection = self.read_line()?;
        let selection = selection.trim();

        // If empty input, default to the first option (index 1)
        let index = if selection.is_empty() {
            1
        } else {
            selection.parse::<usize>().unwrap_or(0)
        };

        if index > 0 && index <= options.len() {
            Ok(index - 1)
        } else {
            Err(anyhow::anyhow!("Invalid selection '{}'", selection))
        }
    }

    /// Yes/no question; Enter picks `default`.
    ///
    /// Accepts "y"/"yes" and "n"/"no" (case-insensitive). Anything else
    /// falls back to `default`.
    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        write!(self.output, "\n{} ({}): ", prompt, hint)?;
        self.output.flush()?;

        let response = self.read_line()?.trim().to_lowercase();
        Ok(match response.as_str() {
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => default,
        })
    }

    /// Single line of free text, trimmed
    pub fn input(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "\n{}: ", prompt)?;
        self.output.flush()?;

        Ok(self.read_line()?.trim().to_string())
    }

    /// Several lines of text, ended by an empty line or end of input
    pub fn multiline(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.output, "\n{} (finish with an empty line):", prompt)?;
        self.output.flush()?;

        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                break;
            }
            lines.push(line.to_string());
        }

        Ok(lines.join("\n"))
    }
}
