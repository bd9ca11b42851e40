//! Defines the endpoint for the monthly spending summary.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    month::month_bounds,
    summary::{CategoryTotal, get_category_totals, get_overall_total},
};

/// The state needed to summarize a month's expenses.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the summary endpoint.
///
/// Both parameters must be present, a request with either one missing is
/// rejected.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    /// The month to summarize (1-12).
    pub month: Option<u8>,
    /// The year to summarize.
    pub year: Option<i32>,
}

/// The per-category and overall spending totals for one month.
#[derive(Debug, PartialEq, Serialize)]
pub struct SummaryResponse {
    /// The total spent in each category that had at least one expense.
    pub category_totals: Vec<CategoryTotal>,
    /// The total spent across all categories, zero if the month had no expenses.
    pub overall_total: f64,
}

/// A route handler for the monthly spending summary.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
    Query(params): Query<SummaryParams>,
) -> impl IntoResponse {
    let (Some(month), Some(year)) = (params.month, params.year) else {
        return Error::MissingMonthOrYear.into_response();
    };

    let (start, end) = match month_bounds(year, month) {
        Ok(bounds) => bounds,
        Err(error) => return error.into_response(),
    };

    let connection = state.db_connection.lock().unwrap();

    let summary = get_category_totals(start, end, &connection).and_then(|category_totals| {
        let overall_total = get_overall_total(start, end, &connection)?;

        Ok(SummaryResponse {
            category_totals,
            overall_total,
        })
    });

    match summary {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error.into_response(),
    }
}
