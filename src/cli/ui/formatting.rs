use crate::ledger::Amount;

pub const CURRENCY_SYMBOL: &str = "R";

/// `R1500.00`, with the sign ahead of the symbol: `-R100.00`.
pub fn format_money(amount: Amount) -> String {
    if amount.is_negative() {
        format!("-{CURRENCY_SYMBOL}{}", amount.abs())
    } else {
        format!("{CURRENCY_SYMBOL}{amount}")
    }
}

/// `  a   Add expense category`, with labels padded to `width`.
pub fn format_two_column_row(label: &str, description: &str, width: usize) -> String {
    format!("  {:<width$}  {}", label, description, width = width + 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_rand_prefix_and_two_decimals() {
        assert_eq!(format_money(Amount::from_cents(150_000)), "R1500.00");
        assert_eq!(format_money(Amount::from_cents(-10_000)), "-R100.00");
        assert_eq!(format_money(Amount::from_cents(-5)), "-R0.05");
        assert_eq!(format_money(Amount::ZERO), "R0.00");
    }

    #[test]
    fn two_column_rows_align_descriptions() {
        assert_eq!(format_two_column_row("a", "Add", 1), "  a    Add");
    }
}
