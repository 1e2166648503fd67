use crate::cli::input::{InputSource, CANCEL_TOKEN};
use crate::cli::output;
use crate::core::errors::CliError;
use crate::ledger::Amount;

/// Outcome of a prompt that may be abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted<T> {
    Value(T),
    Cancel,
    EndOfInput,
}

/// Reads one trimmed line; `:cancel` abandons.
pub fn text(input: &mut dyn InputSource, label: &str) -> Result<Prompted<String>, CliError> {
    let prompt = format!("{label} (or {CANCEL_TOKEN}): ");
    Ok(match input.read_line(&prompt)? {
        None => Prompted::EndOfInput,
        Some(line) if line.trim() == CANCEL_TOKEN => Prompted::Cancel,
        Some(line) => Prompted::Value(line.trim().to_string()),
    })
}

/// Asks until the answer parses as an amount.
pub fn amount(input: &mut dyn InputSource, label: &str) -> Result<Prompted<Amount>, CliError> {
    loop {
        let raw = match text(input, label)? {
            Prompted::Value(raw) => raw,
            Prompted::Cancel => return Ok(Prompted::Cancel),
            Prompted::EndOfInput => return Ok(Prompted::EndOfInput),
        };
        match raw.parse::<Amount>() {
            Ok(amount) => return Ok(Prompted::Value(amount)),
            Err(err) => output::warning(err),
        }
    }
}

/// Yes/no question; end of input counts as no.
pub fn confirm(input: &mut dyn InputSource, question: &str) -> Result<bool, CliError> {
    Ok(input.confirm(question, false)?.unwrap_or(false))
}
