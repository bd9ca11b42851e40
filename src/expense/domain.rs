//! Core types for expense records.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Alias for `i64`, the integer type used for expense IDs in the database.
pub type ExpenseId = i64;

/// The fixed set of budget categories an expense can belong to.
///
/// The set is closed: the database enforces membership with a CHECK
/// constraint, so these variants must match the names listed in
/// [create_expense_table](crate::expense::create_expense_table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Rent or mortgage payments.
    #[serde(rename = "Rent/Mortgage")]
    RentMortgage,
    /// Power, water, internet, and other utilities.
    Utilities,
    /// Fuel.
    Gas,
    /// Groceries and eating out.
    Food,
    /// Movies, games, and other fun.
    Entertainment,
    /// Money put aside.
    Savings,
    /// Insurance premiums.
    Insurance,
    /// Everything that does not fit the other categories.
    Other,
}

impl Category {
    /// Every category, in the order they appear in the database CHECK constraint.
    pub const ALL: [Category; 8] = [
        Category::RentMortgage,
        Category::Utilities,
        Category::Gas,
        Category::Food,
        Category::Entertainment,
        Category::Savings,
        Category::Insurance,
        Category::Other,
    ];

    /// The category's canonical name, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RentMortgage => "Rent/Mortgage",
            Category::Utilities => "Utilities",
            Category::Gas => "Gas",
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Savings => "Savings",
            Category::Insurance => "Insurance",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == string)
            .ok_or_else(|| Error::InvalidCategory(string.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}

/// A single cost event recorded against a budget category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// How much money was spent.
    pub cost: f64,
    /// The day the expense was incurred.
    pub date: Date,
    /// Which budget category the expense belongs to.
    pub category: Category,
    /// A text description of what the expense was for.
    pub description: String,
}
