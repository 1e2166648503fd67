//! Text menu over the ledger: menus, prompts, and rendering.

pub mod input;
pub mod menus;
pub mod output;
pub mod shell;
pub mod shell_context;
pub mod ui;

pub use shell::run_cli;
