use std::io::{self, BufRead, Write};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::cli::ui::menu_renderer::{MenuRenderer, MenuSelection, MenuUI};
use crate::core::errors::CliError;

/// Typing this at any text prompt abandons the current operation.
pub const CANCEL_TOKEN: &str = ":cancel";

/// Where answers come from. `None` means input is exhausted.
pub trait InputSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError>;
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, CliError>;
    /// The chosen key, which script input does not validate.
    fn choose(&mut self, menu: &MenuUI) -> Result<Option<String>, CliError>;
}

/// Terminal input: a line editor with history, dialog confirmations and
/// arrow-key menus.
pub struct ReadlineInput {
    editor: DefaultEditor,
    theme: ColorfulTheme,
    renderer: MenuRenderer,
}

impl ReadlineInput {
    pub fn new() -> Result<Self, CliError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            theme: ColorfulTheme::default(),
            renderer: MenuRenderer::new(),
        })
    }
}

impl InputSource for ReadlineInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str()).ok();
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Some(CANCEL_TOKEN.to_string())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, CliError> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?;
        Ok(Some(answer.unwrap_or(false)))
    }

    fn choose(&mut self, menu: &MenuUI) -> Result<Option<String>, CliError> {
        match self.renderer.show(menu)? {
            MenuSelection::Key(key) => Ok(Some(key)),
            MenuSelection::Back => Ok(Some(BACK_KEY.to_string())),
            MenuSelection::EndOfInput => Ok(None),
        }
    }
}

/// Key reported when a menu is dismissed without a choice.
pub const BACK_KEY: &str = "q";

/// Line-oriented answers from any reader, echoing prompts to `out`.
pub struct ScriptInput<R, W> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> ScriptInput<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }

    fn next_line(&mut self) -> Result<Option<String>, CliError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        Ok(Some(trimmed.to_string()))
    }
}

impl ScriptInput<io::StdinLock<'static>, io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InputSource for ScriptInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        writeln!(self.out, "{prompt}")?;
        self.next_line()
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, CliError> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        writeln!(self.out, "{prompt} {hint}")?;
        let Some(line) = self.next_line()? else {
            return Ok(None);
        };
        let answer = match line.trim().to_ascii_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        };
        Ok(Some(answer))
    }

    fn choose(&mut self, menu: &MenuUI) -> Result<Option<String>, CliError> {
        writeln!(self.out, "{}", menu.snapshot())?;
        Ok(self
            .next_line()?
            .map(|line| line.trim().to_ascii_lowercase()))
    }
}
