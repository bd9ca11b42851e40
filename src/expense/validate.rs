//! Validation of loosely-typed expense input.
//!
//! Request bodies arrive as JSON with no schema guarantees, so the payload
//! type keeps every field loose and [validate] reports exactly which check
//! failed instead of a generic deserialization error.

use serde::Deserialize;
use serde_json::Value;
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{Error, expense::Category};

/// The format dates must use when they are sent as strings.
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The request body for creating or updating an expense.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpensePayload {
    /// How much money was spent. Must be a number greater than zero.
    pub cost: Option<Value>,
    /// The day the expense was incurred, as a 'YYYY-MM-DD' string or a Unix timestamp.
    pub date: Option<Value>,
    /// The name of one of the budget categories.
    pub category: Option<Value>,
    /// A text description of what the expense was for. Defaults to the empty string.
    pub description: Option<String>,
}

/// A validated expense, ready to be written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// How much money was spent.
    pub cost: f64,
    /// The day the expense was incurred.
    pub date: Date,
    /// Which budget category the expense belongs to.
    pub category: Category,
    /// A text description of what the expense was for.
    pub description: String,
}

/// Check `payload` and produce a [NewExpense], or report why it was rejected.
///
/// `local_offset` is applied when the date is given as a Unix timestamp so
/// that the timestamp maps to the caller's calendar day rather than UTC's.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingFields] if `cost`, `date`, or `category` is absent or null,
/// - [Error::InvalidDate] if the date is not a Unix timestamp or a real 'YYYY-MM-DD' date,
/// - [Error::InvalidCategory] if the category is not one of the known category names,
/// - [Error::InvalidCost] if the cost is not a number greater than zero.
pub fn validate(payload: ExpensePayload, local_offset: UtcOffset) -> Result<NewExpense, Error> {
    let (Some(cost), Some(date), Some(category)) = (payload.cost, payload.date, payload.category)
    else {
        return Err(Error::MissingFields);
    };

    let date = parse_date(&date, local_offset)?;

    let category = match category.as_str() {
        Some(name) => name.parse()?,
        None => return Err(Error::InvalidCategory(category.to_string())),
    };

    let cost = match cost.as_f64() {
        Some(cost) if cost > 0.0 => cost,
        _ => return Err(Error::InvalidCost),
    };

    Ok(NewExpense {
        cost,
        date,
        category,
        description: payload.description.unwrap_or_default(),
    })
}

/// Interpret `date` as either a Unix timestamp or a 'YYYY-MM-DD' string.
///
/// Timestamps with a fractional part are truncated to whole seconds.
fn parse_date(date: &Value, local_offset: UtcOffset) -> Result<Date, Error> {
    if let Some(timestamp) = date.as_i64() {
        return date_from_timestamp(timestamp, local_offset);
    }

    if let Some(timestamp) = date.as_f64() {
        return date_from_timestamp(timestamp as i64, local_offset);
    }

    match date.as_str() {
        Some(text) => Date::parse(text, DATE_FORMAT).map_err(|_| Error::InvalidDate),
        None => Err(Error::InvalidDate),
    }
}

fn date_from_timestamp(timestamp: i64, local_offset: UtcOffset) -> Result<Date, Error> {
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map(|date_time| date_time.to_offset(local_offset).date())
        .map_err(|_| Error::InvalidDate)
}
