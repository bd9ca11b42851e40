//! Defines the endpoint for fetching a single expense by its ID.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState,
    expense::{ExpenseId, get_expense},
};

/// The state needed to fetch an expense.
#[derive(Debug, Clone)]
pub struct GetExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for fetching a single expense by its ID.
///
/// Responds with 404 not found if no expense has the requested ID.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_expense_endpoint(
    State(state): State<GetExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match get_expense(expense_id, &connection) {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(error) => error.into_response(),
    }
}
