//! Interactive prompt helpers and the stdin-backed answer source.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use canvass_core::capture::AnswerSource;

/// [`AnswerSource`] reading from stdin and echoing prompts to stdout.
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl AnswerSource for StdinSource {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if !prompt.is_empty() {
            print!("{prompt}");
            io::stdout().flush()?;
        }
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            anyhow::bail!("input ended unexpectedly");
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Ask a yes/no question; anything but `y`/`yes` counts as no.
pub fn confirm(source: &mut dyn AnswerSource, prompt: &str) -> Result<bool> {
    let answer = source.read_line(prompt)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Read an integer within `min..=max`, re-prompting until valid.
pub fn read_usize(
    source: &mut dyn AnswerSource,
    prompt: &str,
    min: usize,
    max: usize,
) -> Result<usize> {
    loop {
        let input = source.read_line(prompt)?;
        match input.trim().parse::<usize>() {
            Ok(n) if (min..=max).contains(&n) => return Ok(n),
            Ok(_) => source.notify(&format!("Please enter a number between {min} and {max}.")),
            Err(_) => source.notify("Please enter a valid integer."),
        }
    }
}

/// Read a non-empty line, trimmed.
pub fn read_nonempty(source: &mut dyn AnswerSource, prompt: &str) -> Result<String> {
    loop {
        let input = source.read_line(prompt)?;
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        source.notify("A value is required.");
    }
}
