//! Defines the endpoint for replacing an existing expense.
use std::sync::{Arc, Mutex};

use axum::{
    Json, debug_handler,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    expense::{ExpenseId, ExpensePayload, update_expense, validate},
    timezone::get_local_offset,
};

/// The state needed to update an expense.
#[derive(Debug, Clone)]
pub struct UpdateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for UpdateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for replacing every field of an existing expense.
///
/// The request body is validated exactly like the create endpoint's.
/// Responds with 404 not found if no expense has the requested ID.
#[debug_handler]
pub async fn update_expense_endpoint(
    State(state): State<UpdateExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Json(payload): Json<ExpensePayload>,
) -> Response {
    let local_offset = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezoneError(state.local_timezone).into_response(),
    };

    let new_expense = match validate(payload, local_offset) {
        Ok(new_expense) => new_expense,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match update_expense(expense_id, new_expense, &connection) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Expense updated successfully" })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}
