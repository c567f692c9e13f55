//! Derived, read-only views over the expense record set.
//!
//! Summaries are recomputed on every call from the full record set; there is
//! no caching or incremental update.

mod aggregation;

pub use aggregation::{category_summary, month_key, monthly_summary, total_spending};
