//! Database operations for expenses.

use rusqlite::{Connection, Row, params};
use time::Date;

use crate::{
    Error,
    expense::{Expense, ExpenseId, NewExpense},
};

/// Which rows [get_expenses] should return.
///
/// Fields set to [None] match every row. Set fields compose with logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Only match expenses dated within these bounds, inclusive.
    pub date_range: Option<(Date, Date)>,
    /// Only match expenses whose category has exactly this name.
    pub category: Option<String>,
}

/// Create a new expense in the database and return it along with its ID.
///
/// # Errors
/// This function will return a:
/// - [Error::ConstraintViolation] if the database rejected the row,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "INSERT INTO expense (cost, date, category, description)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, cost, date, category, description",
        )?
        .query_row(
            (
                expense.cost,
                expense.date,
                expense.category,
                expense.description,
            ),
            map_expense_row,
        )
        .map_err(|error| match error {
            // Code 275 occurs when a CHECK constraint failed.
            rusqlite::Error::SqliteFailure(error, Some(description))
                if error.extended_code == 275 =>
            {
                Error::ConstraintViolation(description)
            }
            error => error.into(),
        })
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare("SELECT id, cost, date, category, description FROM expense WHERE id = :id;")?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(|error| error.into())
}

/// Retrieve the expenses matching `filter` from the database, in the order
/// they were created.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_expenses(
    filter: &ExpenseFilter,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    match (&filter.date_range, &filter.category) {
        (Some((start, end)), Some(category)) => connection
            .prepare(
                "SELECT id, cost, date, category, description FROM expense
                 WHERE date BETWEEN ?1 AND ?2 AND category = ?3
                 ORDER BY id ASC",
            )?
            .query_map(params![start, end, category], map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect(),
        (Some((start, end)), None) => connection
            .prepare(
                "SELECT id, cost, date, category, description FROM expense
                 WHERE date BETWEEN ?1 AND ?2
                 ORDER BY id ASC",
            )?
            .query_map(params![start, end], map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect(),
        (None, Some(category)) => connection
            .prepare(
                "SELECT id, cost, date, category, description FROM expense
                 WHERE category = ?1
                 ORDER BY id ASC",
            )?
            .query_map(params![category], map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect(),
        (None, None) => connection
            .prepare("SELECT id, cost, date, category, description FROM expense ORDER BY id ASC")?
            .query_map([], map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect(),
    }
}

/// Replace every field of the expense `id` with the values in `expense`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingExpense] if `id` does not refer to a valid expense,
/// - [Error::ConstraintViolation] if the database rejected the new values,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    expense: NewExpense,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE expense SET cost = ?1, date = ?2, category = ?3, description = ?4 WHERE id = ?5;",
            params![
                expense.cost,
                expense.date,
                expense.category,
                expense.description,
                id
            ],
        )
        .map_err(|error| match error {
            // Code 275 occurs when a CHECK constraint failed.
            rusqlite::Error::SqliteFailure(error, Some(description))
                if error.extended_code == 275 =>
            {
                Error::ConstraintViolation(description)
            }
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense(id));
    }

    Ok(())
}

/// Delete the expense `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense(id));
    }

    Ok(())
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// The CHECK constraints back up request validation: a row with a
/// non-positive cost or an unknown category name is rejected even if it is
/// written without going through [validate](crate::expense::validate()).
///
/// # Errors
/// This function will return an error if the table cannot be created or if
/// there is some other SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cost REAL NOT NULL CHECK (cost > 0),
                date TEXT NOT NULL,
                category TEXT NOT NULL CHECK (category IN (
                    'Rent/Mortgage', 'Utilities', 'Gas', 'Food',
                    'Entertainment', 'Savings', 'Insurance', 'Other'
                )),
                description TEXT NOT NULL DEFAULT ''
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    // Composite index used by the month filter and summary queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date_category ON expense(date, category);",
        (),
    )?;

    Ok(())
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let cost = row.get(1)?;
    let date = row.get(2)?;
    let category = row.get(3)?;
    let description = row.get(4)?;

    Ok(Expense {
        id,
        cost,
        date,
        category,
        description,
    })
}
