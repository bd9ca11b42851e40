//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_expense_endpoint,
        list_expenses_endpoint, update_expense_endpoint,
    },
    summary::get_summary_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(endpoints::EXPENSE, post(create_expense_endpoint))
        .route(endpoints::EXPENSE_BY_ID, get(get_expense_endpoint))
        .route(endpoints::EXPENSE_BY_ID, put(update_expense_endpoint))
        .route(endpoints::EXPENSE_BY_ID, delete(delete_expense_endpoint))
        .route(endpoints::EXPENSES, get(list_expenses_endpoint))
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// A route handler that reports that the API is up.
async fn get_index() -> Response {
    (
        StatusCode::OK,
        Json(json!({ "message": "Expense Tracker API is running" })),
    )
        .into_response()
}

/// The fallback route handler for requests that match no route.
async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response()
}

#[cfg(test)]
mod api_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState,
        endpoints::{self, format_endpoint},
        expense::Expense,
        routing::build_router,
    };

    fn get_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(db_connection, "Etc/UTC").expect("Could not initialize database.");

        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_reports_the_api_is_running() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Expense Tracker API is running" }));
    }

    #[tokio::test]
    async fn unknown_routes_get_a_json_not_found() {
        let server = get_test_server();

        let response = server.get("/no/such/route").await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Not Found" }));
    }

    #[tokio::test]
    async fn create_then_get_returns_the_created_expense() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSE)
            .json(&json!({
                "cost": 15.99,
                "date": "2025-03-07",
                "category": "Food",
                "description": "Test Expense",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Expense added successfully");
        let id = body["id"].as_i64().expect("expected the new expense's ID");

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_BY_ID, id))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "id": id,
            "cost": 15.99,
            "date": "2025-03-07",
            "category": "Food",
            "description": "Test Expense",
        }));
    }

    #[tokio::test]
    async fn create_accepts_a_unix_timestamp_date() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSE)
            .json(&json!({
                "cost": 10.0,
                // 2025-03-07T00:00:00Z
                "date": 1_741_305_600,
                "category": "Gas",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Value>()["id"]
            .as_i64()
            .expect("expected the new expense's ID");

        let expense = server
            .get(&format_endpoint(endpoints::EXPENSE_BY_ID, id))
            .await
            .json::<Expense>();

        assert_eq!(expense.date, time::macros::date!(2025 - 03 - 07));
        assert_eq!(expense.description, "");
    }

    #[tokio::test]
    async fn create_without_required_fields_is_rejected() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSE)
            .json(&json!({ "cost": 15.99 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Missing required fields" }));
    }

    #[tokio::test]
    async fn create_with_an_invalid_date_is_rejected() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSE)
            .json(&json!({
                "cost": 50.0,
                "date": "2025-02-30",
                "category": "Food",
                "description": "Invalid Date",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Invalid date format. Expected YYYY-MM-DD." }));
    }

    #[tokio::test]
    async fn create_accepts_a_large_cost_and_a_long_description() {
        let server = get_test_server();
        let description = "a".repeat(300);

        let response = server
            .post(endpoints::EXPENSE)
            .json(&json!({
                "cost": 99_999_999.99,
                "date": "2025-03-07",
                "category": "Other",
                "description": description,
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Value>()["id"]
            .as_i64()
            .expect("expected the new expense's ID");

        let expense = server
            .get(&format_endpoint(endpoints::EXPENSE_BY_ID, id))
            .await
            .json::<Expense>();

        assert_eq!(expense.cost, 99_999_999.99);
        assert_eq!(expense.description, description);
    }

    #[tokio::test]
    async fn getting_an_unknown_expense_returns_not_found() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_BY_ID, 999_999))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Expense not found" }));
    }

    #[tokio::test]
    async fn list_filters_by_month_and_category() {
        let server = get_test_server();
        for (cost, date, category) in [
            (10.0, "2025-03-07", "Food"),
            (5.0, "2025-03-08", "Gas"),
            (20.0, "2025-04-07", "Food"),
        ] {
            server
                .post(endpoints::EXPENSE)
                .json(&json!({ "cost": cost, "date": date, "category": category }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let all = server
            .get(endpoints::EXPENSES)
            .await
            .json::<Vec<Expense>>();
        assert_eq!(all.len(), 3);

        let response = server
            .get(&format!(
                "{}?month=3&year=2025&category=Food",
                endpoints::EXPENSES
            ))
            .await;

        response.assert_status_ok();
        let filtered = response.json::<Vec<Expense>>();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].cost, 10.0);
    }

    #[tokio::test]
    async fn update_replaces_the_expense() {
        let server = get_test_server();
        let id = server
            .post(endpoints::EXPENSE)
            .json(&json!({ "cost": 15.99, "date": "2025-03-07", "category": "Food" }))
            .await
            .json::<Value>()["id"]
            .as_i64()
            .expect("expected the new expense's ID");

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE_BY_ID, id))
            .json(&json!({
                "cost": 120.5,
                "date": "2025-04-01",
                "category": "Insurance",
                "description": "Updated",
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Expense updated successfully" }));

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_BY_ID, id))
            .await;
        response.assert_json(&json!({
            "id": id,
            "cost": 120.5,
            "date": "2025-04-01",
            "category": "Insurance",
            "description": "Updated",
        }));
    }

    #[tokio::test]
    async fn updating_an_unknown_expense_returns_not_found() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE_BY_ID, 999))
            .json(&json!({ "cost": 10.0, "date": "2025-03-07", "category": "Food" }))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Expense with ID 999 not found." }));
    }

    #[tokio::test]
    async fn deleting_an_expense_removes_it() {
        let server = get_test_server();
        let id = server
            .post(endpoints::EXPENSE)
            .json(&json!({ "cost": 15.99, "date": "2025-03-07", "category": "Food" }))
            .await
            .json::<Value>()["id"]
            .as_i64()
            .expect("expected the new expense's ID");

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE_BY_ID, id))
            .await;

        response.assert_status_ok();
        response
            .assert_json(&json!({ "message": format!("Expense with ID {id} deleted successfully.") }));

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE_BY_ID, id))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": format!("Expense with ID {id} not found.") }));

        server
            .get(&format_endpoint(endpoints::EXPENSE_BY_ID, id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn summary_requires_both_month_and_year() {
        let server = get_test_server();

        let response = server
            .get(&format!("{}?month=3", endpoints::SUMMARY))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Month and Year parameters are required" }));
    }

    #[tokio::test]
    async fn summary_reports_totals_per_category_and_overall() {
        let server = get_test_server();
        for (cost, date, category) in [
            (10.0, "2025-03-07", "Food"),
            (20.0, "2025-03-15", "Food"),
            (5.0, "2025-03-20", "Gas"),
            (99.0, "2025-04-01", "Gas"),
        ] {
            server
                .post(endpoints::EXPENSE)
                .json(&json!({ "cost": cost, "date": date, "category": category }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get(&format!("{}?month=3&year=2025", endpoints::SUMMARY))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "category_totals": [
                { "category": "Food", "total_cost": 30.0 },
                { "category": "Gas", "total_cost": 5.0 },
            ],
            "overall_total": 35.0,
        }));
    }
}
