use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::formatting::format_money;
use crate::cli::ui::menu_renderer::{MenuUI, MenuUIItem};
use crate::cli::ui::prompts::{self, Prompted};
use crate::core::errors::CliError;
use crate::ledger::{CollectionKind, Column, Removal};

use super::main_menu::INVALID_CHOICE;
use super::MenuFlow;

fn title(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Income => "Income Management",
        CollectionKind::Expense => "Expense Management",
    }
}

fn menu(kind: CollectionKind) -> MenuUI {
    let target = kind.target_label();
    MenuUI::new(
        title(kind),
        vec![
            MenuUIItem::new("a", format!("Add {kind} category")),
            MenuUIItem::new("u", format!("Update {kind} actual amount")),
            MenuUIItem::new("t", format!("Update {kind} {target}")),
            MenuUIItem::new("r", format!("Remove {kind} category")),
            MenuUIItem::new("v", format!("View {kind} categories and totals")),
            MenuUIItem::new("q", format!("Exit {kind} management")),
        ],
    )
}

fn column_label(kind: CollectionKind, column: Column) -> &'static str {
    match column {
        Column::Actual => "actual amount",
        Column::Target => kind.target_label(),
    }
}

/// Loops over the category actions for `kind` until the user goes back.
pub fn run(context: &mut ShellContext, kind: CollectionKind) -> Result<MenuFlow, CliError> {
    let menu = menu(kind);
    loop {
        let Some(choice) = context.input.choose(&menu)? else {
            return Ok(MenuFlow::Exit);
        };
        let flow = match choice.as_str() {
            "a" => {
                output::info(format!("You have selected to add an {kind} category."));
                add(context, kind)?
            }
            "u" => {
                output::info(format!("You have selected to update an {kind} amount."));
                update(context, kind, Column::Actual)?
            }
            "t" => {
                output::info(format!(
                    "You have selected to update an {kind} {}.",
                    kind.target_label()
                ));
                update(context, kind, Column::Target)?
            }
            "r" => {
                output::info(format!("You have selected to remove an {kind} category."));
                remove(context, kind)?
            }
            "v" => {
                context.show_categories(kind);
                MenuFlow::Continue
            }
            "q" => {
                output::info(format!("Exiting {kind} management."));
                MenuFlow::Back
            }
            _ => {
                output::warning(INVALID_CHOICE);
                MenuFlow::Continue
            }
        };
        match flow {
            MenuFlow::Continue => {}
            MenuFlow::Back => return Ok(MenuFlow::Continue),
            MenuFlow::Exit => return Ok(MenuFlow::Exit),
        }
    }
}

fn add(context: &mut ShellContext, kind: CollectionKind) -> Result<MenuFlow, CliError> {
    let label = format!("Please enter the {kind} category you would like to add");
    loop {
        let name = match prompts::text(context.input.as_mut(), &label)? {
            Prompted::Value(name) => name,
            Prompted::Cancel => return cancelled(),
            Prompted::EndOfInput => return Ok(MenuFlow::Exit),
        };
        match context.ledger.add_category(kind, &name) {
            Ok(category) => {
                output::success(format!(
                    "Added {kind} category `{}` with id {}.",
                    category.name, category.id
                ));
                break;
            }
            Err(err) if err.is_recoverable() => output::warning(err),
            Err(err) => {
                context.report_error(kind, &err);
                break;
            }
        }
    }
    context.show_categories(kind);
    Ok(MenuFlow::Continue)
}

fn update(
    context: &mut ShellContext,
    kind: CollectionKind,
    column: Column,
) -> Result<MenuFlow, CliError> {
    context.show_categories(kind);
    let label = column_label(kind, column);
    let name = match prompts::text(
        context.input.as_mut(),
        &format!("Specify the category where you want to update the {label}"),
    )? {
        Prompted::Value(name) => name,
        Prompted::Cancel => return cancelled(),
        Prompted::EndOfInput => return Ok(MenuFlow::Exit),
    };
    let category = match context.ledger.category(kind, &name) {
        Ok(category) => category,
        Err(err) => {
            context.report_error(kind, &err);
            return Ok(MenuFlow::Continue);
        }
    };
    output::info(format!(
        "You are making changes to `{}` with a current {label} of {}.",
        category.name,
        format_money(column.read(&category))
    ));

    let amount = match prompts::amount(context.input.as_mut(), &format!("Specify the new {label}"))? {
        Prompted::Value(amount) => amount,
        Prompted::Cancel => return cancelled(),
        Prompted::EndOfInput => return Ok(MenuFlow::Exit),
    };
    let result = match column {
        Column::Actual => context.ledger.update_actual(kind, &category.name, amount),
        Column::Target => context.ledger.update_target(kind, &category.name, amount),
    };
    match result {
        Ok(updated) => output::success(format!(
            "Updated the {label} of `{}` to {}.",
            updated.name,
            format_money(column.read(&updated))
        )),
        Err(err) => context.report_error(kind, &err),
    }
    context.show_categories(kind);
    Ok(MenuFlow::Continue)
}

fn remove(context: &mut ShellContext, kind: CollectionKind) -> Result<MenuFlow, CliError> {
    let name = match prompts::text(
        context.input.as_mut(),
        "What category would you like to remove?",
    )? {
        Prompted::Value(name) => name,
        Prompted::Cancel => return cancelled(),
        Prompted::EndOfInput => return Ok(MenuFlow::Exit),
    };

    let ShellContext { ledger, input, .. } = &mut *context;
    let mut input_error = None;
    let outcome = ledger.remove_category(kind, &name, |category| {
        let question = format!(
            "Remove {kind} category `{}` (actual {}, {} {})?",
            category.name,
            format_money(category.actual),
            kind.target_label(),
            format_money(category.target)
        );
        prompts::confirm(input.as_mut(), &question).unwrap_or_else(|err| {
            input_error = Some(err);
            false
        })
    });
    if let Some(err) = input_error {
        return Err(err);
    }

    match outcome {
        Ok(Removal::Removed(category)) => output::success(format!(
            "You have removed category `{}` from {}.",
            category.name,
            kind.table_name()
        )),
        Ok(Removal::Aborted) => output::info("Nothing was removed."),
        Err(err) => {
            context.report_error(kind, &err);
            return Ok(MenuFlow::Continue);
        }
    }
    context.show_categories(kind);
    Ok(MenuFlow::Continue)
}

fn cancelled() -> Result<MenuFlow, CliError> {
    output::info("Cancelled.");
    Ok(MenuFlow::Continue)
}
