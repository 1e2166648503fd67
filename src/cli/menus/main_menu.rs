use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::menu_renderer::{MenuUI, MenuUIItem};
use crate::core::errors::CliError;
use crate::ledger::CollectionKind;

use super::{category_menu, MenuFlow};

pub const INVALID_CHOICE: &str = "Please select a valid menu option.";

fn menu() -> MenuUI {
    MenuUI::new(
        "Main Menu",
        vec![
            MenuUIItem::new("e", "View expense management menu"),
            MenuUIItem::new("i", "View income management menu"),
            MenuUIItem::new("b", "View budget summary"),
            MenuUIItem::new("q", "Exit"),
        ],
    )
}

/// Top-level loop; returns when the user quits or input runs out.
pub fn run(context: &mut ShellContext) -> Result<(), CliError> {
    let menu = menu();
    loop {
        let Some(choice) = context.input.choose(&menu)? else {
            tracing::debug!("input exhausted at main menu");
            break;
        };
        let flow = match choice.as_str() {
            "e" => {
                output::info("You have selected the expense menu.");
                category_menu::run(context, CollectionKind::Expense)?
            }
            "i" => {
                output::info("You have selected the income menu.");
                category_menu::run(context, CollectionKind::Income)?
            }
            "b" => {
                output::info("You have selected to view your budget summary.");
                context.show_summary();
                MenuFlow::Continue
            }
            "q" => MenuFlow::Exit,
            _ => {
                output::warning(INVALID_CHOICE);
                MenuFlow::Continue
            }
        };
        if flow == MenuFlow::Exit {
            break;
        }
    }
    output::info("Exiting programme. Good bye!");
    Ok(())
}
