use serde::Serialize;

use super::amount::Amount;
use super::category::Category;

/// Where a variance places the user relative to plan, by strict sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Standing {
    Ahead,
    OnTarget,
    Behind,
}

impl Standing {
    pub fn of(variance: Amount) -> Self {
        match variance.cents() {
            c if c > 0 => Standing::Ahead,
            c if c < 0 => Standing::Behind,
            _ => Standing::OnTarget,
        }
    }
}

/// Actual and target sums of one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CollectionTotals {
    pub actual: Amount,
    pub target: Amount,
}

/// Categories of one collection in id order plus the synthetic `TOTAL` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListing {
    pub categories: Vec<Category>,
    pub totals: CollectionTotals,
}

impl CategoryListing {
    pub const TOTAL_LABEL: &'static str = "TOTAL";

    pub fn new(categories: Vec<Category>, totals: CollectionTotals) -> Self {
        Self { categories, totals }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every row as `(id, name, actual, target)`, the totals row last with no id.
    pub fn rows(&self) -> Vec<(Option<u32>, &str, Amount, Amount)> {
        self.categories
            .iter()
            .map(|c| (Some(c.id), c.name.as_str(), c.actual, c.target))
            .chain(std::iter::once((
                None,
                Self::TOTAL_LABEL,
                self.totals.actual,
                self.totals.target,
            )))
            .collect()
    }
}

/// Income, expense and savings figures with their variances.
///
/// Income variance is `actual - target`; expense variance is `target - actual`,
/// so in both cases a positive figure is favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub income: CollectionTotals,
    pub expenses: CollectionTotals,
    pub income_variance: Amount,
    pub expense_variance: Amount,
    pub actual_difference: Amount,
    pub target_difference: Amount,
    pub savings_variance: Amount,
}

impl SummaryReport {
    pub fn new(income: CollectionTotals, expenses: CollectionTotals) -> Self {
        let actual_difference = income.actual - expenses.actual;
        let target_difference = income.target - expenses.target;
        Self {
            income,
            expenses,
            income_variance: income.actual - income.target,
            expense_variance: expenses.target - expenses.actual,
            actual_difference,
            target_difference,
            savings_variance: actual_difference - target_difference,
        }
    }

    pub fn income_standing(&self) -> Standing {
        Standing::of(self.income_variance)
    }

    pub fn expense_standing(&self) -> Standing {
        Standing::of(self.expense_variance)
    }

    pub fn savings_standing(&self) -> Standing {
        Standing::of(self.savings_variance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(actual: i64, target: i64) -> CollectionTotals {
        CollectionTotals {
            actual: Amount::from_cents(actual * 100),
            target: Amount::from_cents(target * 100),
        }
    }

    #[test]
    fn report_applies_sign_conventions() {
        let report = SummaryReport::new(totals(20_000, 18_000), totals(1_500, 1_600));
        assert_eq!(report.income_variance.to_string(), "2000.00");
        assert_eq!(report.expense_variance.to_string(), "100.00");
        assert_eq!(report.actual_difference.to_string(), "18500.00");
        assert_eq!(report.target_difference.to_string(), "16400.00");
        assert_eq!(report.savings_variance.to_string(), "2100.00");
        assert_eq!(report.income_standing(), Standing::Ahead);
        assert_eq!(report.expense_standing(), Standing::Ahead);
    }

    #[test]
    fn overspending_is_behind() {
        let report = SummaryReport::new(totals(1_000, 1_000), totals(900, 800));
        assert_eq!(report.income_standing(), Standing::OnTarget);
        assert_eq!(report.expense_standing(), Standing::Behind);
        assert_eq!(report.savings_variance, Amount::from_cents(-10_000));
        assert_eq!(report.savings_standing(), Standing::Behind);
    }

    #[test]
    fn listing_appends_totals_row() {
        let mut rent = Category::new(1, "Rent");
        rent.actual = Amount::from_cents(150_000);
        let mut food = Category::new(2, "Food");
        food.target = Amount::from_cents(40_000);
        let listing = CategoryListing::new(vec![rent, food], totals(1_500, 400));
        let rows = listing.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[2],
            (
                None,
                "TOTAL",
                Amount::from_cents(150_000),
                Amount::from_cents(40_000)
            )
        );
    }
}
