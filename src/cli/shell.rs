use crate::cli::menus::main_menu;
use crate::cli::shell_context::{CliMode, ShellContext};
use crate::core::errors::CliError;

/// Runs the menu until the user quits or input ends. Ledger errors are reported
/// in place; a store that cannot be opened ends the run.
pub fn run_cli() -> Result<(), CliError> {
    let mode = CliMode::detect();
    let mut context = ShellContext::new(mode)?;
    context.print_banner();
    main_menu::run(&mut context)
}
