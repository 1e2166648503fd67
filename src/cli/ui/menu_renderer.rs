use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Attribute, SetAttribute},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::output::{self, current_preferences, MessageKind};
use crate::cli::ui::formatting::format_two_column_row;

/// A titled list of single-letter options.
#[derive(Clone, Debug)]
pub struct MenuUI {
    pub title: String,
    pub items: Vec<MenuUIItem>,
}

impl MenuUI {
    pub fn new(title: impl Into<String>, items: Vec<MenuUIItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    /// Plain listing used when the menu is answered by typing its key.
    pub fn snapshot(&self) -> String {
        let prefs = current_preferences();
        let mut lines = vec![output::style(MessageKind::Section, &self.title, &prefs)];
        lines.extend(
            self.items
                .iter()
                .map(|item| format_two_column_row(&item.key, &item.label, 1)),
        );
        lines.join("\n")
    }

    fn position(&self, key: char) -> Option<usize> {
        let key = key.to_ascii_lowercase().to_string();
        self.items.iter().position(|item| item.key == key)
    }
}

#[derive(Clone, Debug)]
pub struct MenuUIItem {
    pub key: String,
    pub label: String,
}

impl MenuUIItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// What the user did with a raw-mode menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSelection {
    Key(String),
    Back,
    EndOfInput,
}

pub struct MenuRenderer {
    plain_mode: bool,
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self {
            plain_mode: current_preferences().plain_mode,
        }
    }

    /// Arrow keys move, Enter picks, a letter picks its item directly, Esc
    /// goes back and Ctrl-C/Ctrl-D end input. The menu is drawn below whatever
    /// is already on screen and only its own rows are erased afterwards.
    pub fn show(&self, menu: &MenuUI) -> io::Result<MenuSelection> {
        if menu.items.is_empty() {
            return Ok(MenuSelection::Back);
        }
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(cursor::Hide)?;

        let result = self.event_loop(&mut stdout, menu);

        stdout.execute(cursor::Show).ok();
        terminal::disable_raw_mode().ok();
        result
    }

    fn event_loop(&self, out: &mut impl Write, menu: &MenuUI) -> io::Result<MenuSelection> {
        let last = menu.items.len() - 1;
        let mut selected = 0;
        let mut drawn = 0;
        let selection = loop {
            self.erase(out, drawn)?;
            drawn = self.render(out, menu, selected)?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                if matches!(key.code, KeyCode::Char('c' | 'C' | 'd' | 'D')) {
                    break MenuSelection::EndOfInput;
                }
                continue;
            }
            match key.code {
                KeyCode::Up => selected = selected.checked_sub(1).unwrap_or(last),
                KeyCode::Down => selected = if selected == last { 0 } else { selected + 1 },
                KeyCode::Home => selected = 0,
                KeyCode::End => selected = last,
                KeyCode::Enter => break MenuSelection::Key(menu.items[selected].key.clone()),
                KeyCode::Esc => break MenuSelection::Back,
                KeyCode::Char(ch) => {
                    if let Some(index) = menu.position(ch) {
                        break MenuSelection::Key(menu.items[index].key.clone());
                    }
                }
                _ => {}
            }
        };
        self.erase(out, drawn)?;
        Ok(selection)
    }

    /// Draws the menu at the cursor and returns how many rows it took.
    fn render(&self, out: &mut impl Write, menu: &MenuUI, selected: usize) -> io::Result<u16> {
        let prefs = current_preferences();
        let mut rows = 0;
        // Raw mode needs explicit carriage returns.
        write!(
            out,
            "{}\r\n\r\n",
            output::style(MessageKind::Section, &menu.title, &prefs)
        )?;
        rows += 2;
        for (index, item) in menu.items.iter().enumerate() {
            let is_selected = index == selected;
            let pointer = match (is_selected, self.plain_mode) {
                (true, true) => ">",
                (true, false) => "▸",
                (false, _) => " ",
            };
            if is_selected {
                out.execute(SetAttribute(Attribute::Reverse))?;
            }
            write!(
                out,
                " {pointer}{}",
                format_two_column_row(&item.key, &item.label, 1)
            )?;
            out.execute(SetAttribute(Attribute::Reset))?;
            write!(out, "\r\n")?;
            rows += 1;
        }
        write!(
            out,
            "\r\n(Arrow keys to move, Enter or the letter to select, Esc to go back)\r\n"
        )?;
        rows += 2;
        out.flush()?;
        Ok(rows)
    }

    /// Removes the last `rows` rows drawn, leaving earlier output in place.
    fn erase(&self, out: &mut impl Write, rows: u16) -> io::Result<()> {
        if rows == 0 {
            return Ok(());
        }
        out.execute(cursor::MoveToPreviousLine(rows))?;
        out.execute(terminal::Clear(ClearType::FromCursorDown))?;
        Ok(())
    }
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}
