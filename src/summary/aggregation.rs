//! Expense aggregation for the dashboard and its charts.
//!
//! These functions are pure: handlers load the full record set with
//! [crate::expense::list_expenses] and pass it in, so a failed load surfaces
//! as an error at the call site instead of being masked as an empty summary.

use std::collections::HashMap;

use time::Date;

use crate::expense::Expense;

/// Sum the amounts of all expenses.
///
/// Returns `0.0` for an empty record set.
pub fn total_spending(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Sum expense amounts grouped by category.
///
/// Only categories present in at least one expense appear as keys.
pub fn category_summary(expenses: &[Expense]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();

    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }

    totals
}

/// Sum expense amounts grouped by the calendar month of their date.
///
/// Keys are `YYYY-MM` strings and are not sorted; consumers that want a
/// chronological ordering must sort the keys themselves (the string format
/// sorts chronologically).
pub fn monthly_summary(expenses: &[Expense]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();

    for expense in expenses {
        *totals.entry(month_key(expense.date)).or_insert(0.0) += expense.amount;
    }

    totals
}

/// Format the `YYYY-MM` prefix of a date.
pub fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), date.month() as u8)
}
