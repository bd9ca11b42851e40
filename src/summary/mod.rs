//! Monthly summaries of spending by category.

mod db;
mod endpoint;

pub use db::{CategoryTotal, get_category_totals, get_overall_total};
pub use endpoint::get_summary_endpoint;
