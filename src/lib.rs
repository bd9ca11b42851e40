//! Expenseur is a REST API for recording and summarizing personal expenses.
//!
//! The API stores expenses in a SQLite database and serves JSON endpoints for
//! creating, listing, updating, and deleting expenses, plus a monthly summary
//! of spending by category.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod expense;
mod logging;
mod month;
mod routing;
mod summary;
mod timezone;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use expense::ExpenseId;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body did not contain all of the required expense fields.
    #[error("Missing required fields")]
    MissingFields,

    /// The expense date was not a Unix timestamp or a valid 'YYYY-MM-DD' string.
    #[error("Invalid date format. Expected YYYY-MM-DD.")]
    InvalidDate,

    /// The expense category was not one of the known category names.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// The expense cost was not a number greater than zero.
    #[error("Cost must be a number greater than zero")]
    InvalidCost,

    /// A month was outside the range 1-12, or the year had no such month.
    #[error("{month} is not a valid month in year {year}")]
    InvalidMonth {
        /// The month that was requested.
        month: u8,
        /// The year that was requested.
        year: i32,
    },

    /// The summary endpoint was called without the month or the year parameter.
    #[error("Month and Year parameters are required")]
    MissingMonthOrYear,

    /// The requested expense was not found.
    #[error("Expense not found")]
    NotFound,

    /// Tried to update an expense that does not exist in the database.
    #[error("Expense with ID {0} not found.")]
    UpdateMissingExpense(ExpenseId),

    /// Tried to delete an expense that does not exist in the database.
    #[error("Expense with ID {0} not found.")]
    DeleteMissingExpense(ExpenseId),

    /// The database rejected a row that slipped past request validation.
    #[error("the database rejected the row: {0}")]
    ConstraintViolation(String),

    /// An unhandled SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the lock for the database connection.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 275 occurs when a CHECK constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(description))
                if sql_error.extended_code == 275 =>
            {
                Error::ConstraintViolation(description)
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Error::MissingFields
            | Error::InvalidDate
            | Error::InvalidCategory(_)
            | Error::InvalidCost
            | Error::InvalidMonth { .. }
            | Error::MissingMonthOrYear => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::UpdateMissingExpense(_) | Error::DeleteMissingExpense(_) => {
                StatusCode::NOT_FOUND
            }
            Error::ConstraintViolation(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::InvalidTimezoneError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The details of internal errors are not intended for the client.
        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("an internal error occurred: {self}");
            "An internal error occurred".to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
