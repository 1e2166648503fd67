use std::io::{self, IsTerminal};
use std::path::PathBuf;

use crate::{
    cli::{
        input::{InputSource, ReadlineInput, ScriptInput},
        output::{self, OutputPreferences},
        ui::report,
    },
    config::ConfigManager,
    core::errors::{CliError, TrackerError},
    ledger::{CollectionKind, Ledger},
    storage::JsonRowStore,
    utils::build_info,
};

pub const SCRIPT_ENV: &str = "BUDGET_TRACKER_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    /// Script mode when requested through the environment or when stdin is
    /// not a terminal.
    pub fn detect() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() || !io::stdin().is_terminal() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// Everything a menu action needs: the ledger and where answers come from.
pub struct ShellContext {
    pub ledger: Ledger,
    pub input: Box<dyn InputSource>,
    pub store_path: Option<PathBuf>,
}

impl ShellContext {
    /// Loads the config and opens the store; any failure here is fatal.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load_or_init()?;
        output::set_preferences(OutputPreferences {
            plain_mode: config.plain_mode || mode == CliMode::Script,
            screen_reader_mode: config.screen_reader_mode,
        });

        let store_path = manager.resolved_store_path(&config);
        let store = JsonRowStore::open(&store_path)?;
        let ledger = Ledger::open(Box::new(store))?;
        let input: Box<dyn InputSource> = match mode {
            CliMode::Interactive => Box::new(ReadlineInput::new()?),
            CliMode::Script => Box::new(ScriptInput::stdin()),
        };
        tracing::debug!(?mode, store = %store_path.display(), "shell context ready");

        Ok(Self {
            ledger,
            input,
            store_path: Some(store_path),
        })
    }

    pub fn with_parts(ledger: Ledger, input: Box<dyn InputSource>) -> Self {
        Self {
            ledger,
            input,
            store_path: None,
        }
    }

    pub fn print_banner(&self) {
        output::section(format!(
            "Budget Tracker {}",
            build_info::current().short()
        ));
        if let Some(path) = &self.store_path {
            output::info(format!("Records are kept in {}", path.display()));
        }
    }

    /// Prints `err`, adding a close-match hint for unknown names.
    pub fn report_error(&self, kind: CollectionKind, err: &TrackerError) {
        output::error(err);
        if let TrackerError::NotFound { name, .. } = err {
            if let Some(suggestion) = self.ledger.suggest(kind, name) {
                output::info(format!("Did you mean `{suggestion}`?"));
            }
        }
    }

    pub fn show_categories(&self, kind: CollectionKind) {
        match self.ledger.list_categories(kind) {
            Ok(listing) => {
                output::section(format!("Showing entries in {}", kind.table_name()));
                output::block(report::category_table(kind, &listing));
                if listing.is_empty() {
                    output::info(format!("No {kind} categories yet."));
                }
            }
            Err(err) => self.report_error(kind, &err),
        }
    }

    pub fn show_summary(&self) {
        match self.ledger.budget_summary() {
            Ok(summary) => {
                output::section("Budget summary");
                output::block(report::summary_table(&summary));
            }
            Err(err) => output::error(format!("Unable to produce the budget summary: {err}")),
        }
    }
}
