use std::fmt;

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Name carried by the seed row of a freshly created collection. User names are
/// never empty, so the marker cannot collide with a real category.
pub const PLACEHOLDER_NAME: &str = "";
pub const PLACEHOLDER_ID: u32 = 1;

/// Which of the two category sets an operation targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKind {
    Income,
    Expense,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Income, CollectionKind::Expense];

    /// Storage key for the collection.
    pub fn table_name(self) -> &'static str {
        match self {
            CollectionKind::Income => "incomes",
            CollectionKind::Expense => "expenses",
        }
    }

    /// Label used for the `target` field: a goal for income, a budget for expenses.
    pub fn target_label(self) -> &'static str {
        match self {
            CollectionKind::Income => "goal",
            CollectionKind::Expense => "budget",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Income => f.write_str("income"),
            CollectionKind::Expense => f.write_str("expense"),
        }
    }
}

/// A named income or expense line with its realised and planned amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub actual: Amount,
    #[serde(default)]
    pub target: Amount,
}

impl Category {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            actual: Amount::ZERO,
            target: Amount::ZERO,
        }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_ID, PLACEHOLDER_NAME)
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID && self.name == PLACEHOLDER_NAME
    }
}

/// Which amount column an aggregate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Actual,
    Target,
}

impl Column {
    pub fn read(self, category: &Category) -> Amount {
        match self {
            Column::Actual => category.actual,
            Column::Target => category.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_recognised() {
        assert!(Category::placeholder().is_placeholder());
        assert!(!Category::new(PLACEHOLDER_ID, "Rent").is_placeholder());
        assert!(!Category::new(2, PLACEHOLDER_NAME).is_placeholder());
    }

    #[test]
    fn labels_follow_collection() {
        assert_eq!(CollectionKind::Income.target_label(), "goal");
        assert_eq!(CollectionKind::Expense.target_label(), "budget");
        assert_eq!(CollectionKind::Expense.table_name(), "expenses");
        assert_eq!(CollectionKind::Income.to_string(), "income");
    }

    #[test]
    fn new_category_starts_at_zero() {
        let category = Category::new(4, "Food");
        assert!(category.actual.is_zero());
        assert!(category.target.is_zero());
        assert_eq!(Column::Target.read(&category), Amount::ZERO);
    }
}
