//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    expense::{ExpensePayload, create_expense, validate},
    timezone::get_local_offset,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new expense.
///
/// Validates the request body before touching the database and responds with
/// 201 created and the new expense's ID on success.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Json(payload): Json<ExpensePayload>,
) -> impl IntoResponse {
    let local_offset = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezoneError(state.local_timezone).into_response(),
    };

    let new_expense = match validate(payload, local_offset) {
        Ok(new_expense) => new_expense,
        Err(error) => return error.into_response(),
    };

    let connection = state.db_connection.lock().unwrap();

    match create_expense(new_expense, &connection) {
        Ok(expense) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Expense added successfully", "id": expense.id })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        body::Body,
        extract::State,
        http::{Response, StatusCode},
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{
            Category, count_expenses,
            create_endpoint::{CreateExpenseState, create_expense_endpoint},
            get_expense,
        },
    };

    fn get_test_state() -> CreateExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn creates_expense_and_returns_its_id() {
        let state = get_test_state();
        let payload = serde_json::from_value(json!({
            "cost": 15.99,
            "date": "2025-03-07",
            "category": "Food",
            "description": "Test Expense",
        }))
        .unwrap();

        let response = create_expense_endpoint(State(state.clone()), Json(payload))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = parse_json_body(response).await;
        assert_eq!(body["message"], "Expense added successfully");
        let id = body["id"].as_i64().expect("expected the new expense's ID");

        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(id, &connection).expect("Could not get created expense");
        assert_eq!(expense.cost, 15.99);
        assert_eq!(expense.date, date!(2025 - 03 - 07));
        assert_eq!(expense.category, Category::Food);
        assert_eq!(expense.description, "Test Expense");
    }

    #[tokio::test]
    async fn rejects_incomplete_payload_without_creating_a_row() {
        let state = get_test_state();
        let payload = serde_json::from_value(json!({ "cost": 15.99 })).unwrap();

        let response = create_expense_endpoint(State(state.clone()), Json(payload))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json_body(response).await;
        assert_eq!(body["error"], "Missing required fields");

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection), Ok(0));
    }

    #[tokio::test]
    async fn rejects_invalid_date_without_creating_a_row() {
        let state = get_test_state();
        let payload = serde_json::from_value(json!({
            "cost": 50.0,
            "date": "2025-02-30",
            "category": "Food",
            "description": "Invalid Date",
        }))
        .unwrap();

        let response = create_expense_endpoint(State(state.clone()), Json(payload))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json_body(response).await;
        assert_eq!(body["error"], "Invalid date format. Expected YYYY-MM-DD.");

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection), Ok(0));
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let state = get_test_state();
        let payload = serde_json::from_value(json!({
            "cost": 50.0,
            "date": "2025-03-07",
            "category": "Groceries",
        }))
        .unwrap();

        let response = create_expense_endpoint(State(state), Json(payload))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json_body(response).await;
        assert_eq!(body["error"], "Invalid category: Groceries");
    }

    async fn parse_json_body(response: Response<Body>) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        serde_json::from_slice(&body_bytes).expect("response body should be JSON")
    }
}
