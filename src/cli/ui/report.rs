use crate::cli::ui::formatting::format_money;
use crate::cli::ui::table_renderer::{Table, TableColumn};
use crate::ledger::{Amount, CategoryListing, CollectionKind, Standing, SummaryReport};

const NAME_COLUMN_MAX: usize = 32;

/// `ID | CATEGORY | ACTUAL | BUDGET` (or `GOAL`) with the `TOTAL` row as footer.
pub fn category_table(kind: CollectionKind, listing: &CategoryListing) -> String {
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("CATEGORY").max_width(NAME_COLUMN_MAX),
        TableColumn::right("ACTUAL"),
        TableColumn::right(kind.target_label().to_uppercase()),
    ]);
    for (id, name, actual, target) in listing.rows() {
        let row = vec![
            id.map(|id| id.to_string()).unwrap_or_default(),
            name.to_string(),
            format_money(actual),
            format_money(target),
        ];
        if id.is_some() {
            table.push_row(row);
        } else {
            table.push_footer(row);
        }
    }
    table.render()
}

/// Three-row report followed by one narrative line per row.
pub fn summary_table(report: &SummaryReport) -> String {
    let mut table = Table::new(vec![
        TableColumn::left(""),
        TableColumn::right("ACTUAL"),
        TableColumn::right("TARGET"),
        TableColumn::right("VARIANCE"),
    ]);
    let rows = [
        ("Income", report.income.actual, report.income.target, report.income_variance),
        (
            "Expenses",
            report.expenses.actual,
            report.expenses.target,
            report.expense_variance,
        ),
        (
            "Savings",
            report.actual_difference,
            report.target_difference,
            report.savings_variance,
        ),
    ];
    for (label, actual, target, variance) in rows {
        table.push_row(vec![
            label.to_string(),
            format_money(actual),
            format_money(target),
            format_money(variance),
        ]);
    }

    let mut out = table.render();
    for line in narrative(report) {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

pub fn narrative(report: &SummaryReport) -> Vec<String> {
    let income = report.income_variance;
    let expenses = report.expense_variance;
    let savings = report.savings_variance;
    vec![
        match report.income_standing() {
            Standing::Ahead => format!("Income is {} ahead of your goal.", magnitude(income)),
            Standing::Behind => format!("Income is {} short of your goal.", magnitude(income)),
            Standing::OnTarget => "Income is exactly on your goal.".to_string(),
        },
        match report.expense_standing() {
            Standing::Ahead => format!("Spending is {} under budget.", magnitude(expenses)),
            Standing::Behind => format!("Spending is {} over budget.", magnitude(expenses)),
            Standing::OnTarget => "Spending is exactly on budget.".to_string(),
        },
        match report.savings_standing() {
            Standing::Ahead => format!("You saved {} more than planned.", magnitude(savings)),
            Standing::Behind => format!("You saved {} less than planned.", magnitude(savings)),
            Standing::OnTarget => "Savings are exactly as planned.".to_string(),
        },
    ]
}

fn magnitude(amount: Amount) -> String {
    format_money(amount.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Category, CollectionTotals};

    fn cents(value: i64) -> Amount {
        Amount::from_cents(value)
    }

    #[test]
    fn category_table_labels_target_by_collection() {
        let mut rent = Category::new(1, "Rent");
        rent.actual = cents(150_001);
        let listing = CategoryListing::new(
            vec![rent],
            CollectionTotals {
                actual: cents(150_001),
                target: Amount::ZERO,
            },
        );
        let rendered = category_table(CollectionKind::Expense, &listing);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].contains("BUDGET"));
        assert!(lines[2].contains("Rent"));
        assert!(lines[2].contains("R1500.01"));
        assert!(lines.last().expect("total").contains("TOTAL"));

        let rendered = category_table(CollectionKind::Income, &listing);
        assert!(rendered.lines().next().expect("header").contains("GOAL"));
    }

    #[test]
    fn empty_listing_still_shows_totals() {
        let listing = CategoryListing::new(Vec::new(), CollectionTotals::default());
        let rendered = category_table(CollectionKind::Expense, &listing);
        assert!(rendered.contains("TOTAL"));
        assert!(rendered.contains("R0.00"));
    }

    #[test]
    fn summary_reports_each_line_and_narrative() {
        let report = SummaryReport::new(
            CollectionTotals {
                actual: cents(2_000_000),
                target: cents(1_800_000),
            },
            CollectionTotals {
                actual: cents(150_000),
                target: cents(160_000),
            },
        );
        let rendered = summary_table(&report);
        assert!(rendered.contains("R18500.00"));
        assert!(rendered.contains("R16400.00"));
        assert!(rendered.contains("Income is R2000.00 ahead of your goal."));
        assert!(rendered.contains("Spending is R100.00 under budget."));
        assert!(rendered.contains("You saved R2100.00 more than planned."));
    }

    #[test]
    fn overspending_is_reported_as_over_budget() {
        let report = SummaryReport::new(
            CollectionTotals::default(),
            CollectionTotals {
                actual: cents(50_000),
                target: cents(40_000),
            },
        );
        let lines = narrative(&report);
        assert_eq!(lines[0], "Income is exactly on your goal.");
        assert_eq!(lines[1], "Spending is R100.00 over budget.");
        assert_eq!(lines[2], "You saved R100.00 less than planned.");
    }
}
