//! Defines the endpoint for deleting an expense.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState,
    expense::{ExpenseId, delete_expense},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense.
///
/// Responds with 404 not found if no expense has the requested ID, so
/// deleting the same expense twice reports the second delete as missing.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match delete_expense(expense_id, &connection) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "message": format!("Expense with ID {expense_id} deleted successfully.")
            })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}
