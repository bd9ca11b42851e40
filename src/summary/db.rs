//! Database queries for monthly spending totals.

use rusqlite::{Connection, Row, params};
use serde::Serialize;
use time::Date;

use crate::{Error, expense::Category};

/// The total spent in one category over one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Which budget category was summed.
    pub category: Category,
    /// The sum of the cost of the category's expenses.
    pub total_cost: f64,
}

/// Sum expenses per category for dates between `start` and `end`, inclusive.
///
/// Categories with no matching expenses are omitted. Results are ordered by
/// category name so the output is deterministic.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_category_totals(
    start: Date,
    end: Date,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT category, SUM(cost) AS total_cost
             FROM expense
             WHERE date BETWEEN ?1 AND ?2
             GROUP BY category
             ORDER BY category ASC",
        )?
        .query_map(params![start, end], map_category_total_row)?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

/// Sum the cost of every expense dated between `start` and `end`, inclusive.
///
/// Returns zero when no expenses match.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_overall_total(start: Date, end: Date, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(cost), 0) FROM expense WHERE date BETWEEN ?1 AND ?2",
            params![start, end],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

fn map_category_total_row(row: &Row) -> Result<CategoryTotal, rusqlite::Error> {
    let category = row.get(0)?;
    let total_cost = row.get(1)?;

    Ok(CategoryTotal {
        category,
        total_cost,
    })
}
