//! Defines the endpoint for listing expenses with optional filters.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState,
    expense::{ExpenseFilter, get_expenses},
    month::month_bounds,
};

/// The state needed to list expenses.
#[derive(Debug, Clone)]
pub struct ListExpensesState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for filtering the expense list.
#[derive(Debug, Default, Deserialize)]
pub struct ListExpensesParams {
    /// Restrict results to this month (1-12). Only applied together with `year`.
    pub month: Option<u8>,
    /// Restrict results to this year. Only applied together with `month`.
    pub year: Option<i32>,
    /// Restrict results to expenses whose category has exactly this name.
    pub category: Option<String>,
}

/// A route handler for listing expenses.
///
/// The `month` and `year` parameters restrict results to one calendar month
/// and only apply when both are present. The `category` parameter matches the
/// category name exactly and composes with the month filter. An unknown
/// category name matches nothing.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn list_expenses_endpoint(
    State(state): State<ListExpensesState>,
    Query(params): Query<ListExpensesParams>,
) -> impl IntoResponse {
    let date_range = match (params.month, params.year) {
        (Some(month), Some(year)) => match month_bounds(year, month) {
            Ok(bounds) => Some(bounds),
            Err(error) => return error.into_response(),
        },
        _ => None,
    };

    let filter = ExpenseFilter {
        date_range,
        category: params.category,
    };

    let connection = state.db_connection.lock().unwrap();

    match get_expenses(&filter, &connection) {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(error) => error.into_response(),
    }
}
