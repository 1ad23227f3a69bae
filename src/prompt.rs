//! Interactive yes/no questions and the tile options they produce.

use std::io::{self, BufRead, Write};

use crate::error::{Result, TilesError};

/// Something that can answer a yes/no question.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Asks on a writer and reads answers line by line from a reader.
///
/// An empty answer means yes. Unrecognised answers are asked again.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            write!(self.output, "{} [Y/n] ", question)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(TilesError::Io {
                    path: "<stdin>".into(),
                    message: format!("No answer to '{}'", question),
                });
            }

            match parse_answer(&line) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Please respond with 'yes' or 'no' (or 'y' or 'n').")?,
            }
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "ye" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Run-wide choices that select the tiling config template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TileOptions {
    /// Generate WebVR-capable tiles.
    pub vr: bool,
    /// Generate a 1024px preview image.
    pub preview_1024: bool,
}

impl TileOptions {
    /// Ask both questions once, in order.
    pub fn prompt(prompter: &mut dyn Prompter) -> Result<Self> {
        let vr = prompter.confirm("Do you need WebVR support?")?;
        let preview_1024 = prompter.confirm("Do you want 1024px preview?")?;
        Ok(Self { vr, preview_1024 })
    }

    /// Name of the config template for this combination.
    pub fn config_file_name(&self) -> &'static str {
        match (self.vr, self.preview_1024) {
            (true, true) => "tv_tiles_with_vr_preview_1024.config",
            (true, false) => "tv_tiles_with_vr.config",
            (false, true) => "tv_tiles_for_cars_ipad_preview_1024.config",
            (false, false) => "tv_tiles_for_cars_ipad.config",
        }
    }
}
