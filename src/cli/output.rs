use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    /// ASCII glyphs and no colour.
    pub plain_mode: bool,
    /// Textual labels instead of icons, no colour.
    pub screen_reader_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO:", "ℹ"),
        MessageKind::Success => ("OK:", "✔"),
        MessageKind::Warning => ("WARNING:", "⚠"),
        MessageKind::Error => ("ERROR:", "✖"),
        MessageKind::Section => ("", ""),
    }
}

/// Renders `message` for `kind` under `prefs` without printing it.
pub fn style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let undecorated = prefs.plain_mode || prefs.screen_reader_mode;

    if kind == MessageKind::Section {
        let base = format!("=== {} ===", text.trim());
        return if undecorated {
            base
        } else {
            base.bold().to_string()
        };
    }

    let (label, icon) = build_label(kind);
    if undecorated {
        return format!("{label} {text}");
    }

    let base = format!("{icon} {text}");
    match kind {
        MessageKind::Success => base.green().to_string(),
        MessageKind::Warning => base.yellow().to_string(),
        MessageKind::Error => base.red().to_string(),
        MessageKind::Info | MessageKind::Section => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = style(kind, message, &current_preferences());
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Prints pre-rendered multi-line text such as a table.
pub fn block(text: impl fmt::Display) {
    println!("{text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_uses_text_labels() {
        let prefs = OutputPreferences {
            plain_mode: true,
            screen_reader_mode: false,
        };
        assert_eq!(style(MessageKind::Error, "boom", &prefs), "ERROR: boom");
        assert_eq!(style(MessageKind::Section, " Expenses ", &prefs), "=== Expenses ===");
    }

    #[test]
    fn decorated_mode_keeps_message_text() {
        let styled = style(MessageKind::Success, "saved", &OutputPreferences::default());
        assert!(styled.contains("✔ saved"));
    }
}
