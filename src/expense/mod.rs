//! Expense management for the expense tracker.
//!
//! This module contains everything related to expense records:
//! - The expense model and the closed set of budget categories
//! - Validation of loosely-typed expense input
//! - Database functions for storing and querying expenses
//! - Route handlers for the expense CRUD endpoints

mod create_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod get_endpoint;
mod list_endpoint;
mod update_endpoint;
mod validate;

pub use create_endpoint::create_expense_endpoint;
pub use db::{
    ExpenseFilter, count_expenses, create_expense, create_expense_table, delete_expense,
    get_expense, get_expenses, update_expense,
};
pub use delete_endpoint::delete_expense_endpoint;
pub use domain::{Category, Expense, ExpenseId};
pub use get_endpoint::get_expense_endpoint;
pub use list_endpoint::list_expenses_endpoint;
pub use update_endpoint::update_expense_endpoint;
pub use validate::{ExpensePayload, NewExpense, validate};
