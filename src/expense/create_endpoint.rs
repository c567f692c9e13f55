//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{AppState, endpoints, expense::core::{Expense, create_expense}};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating or updating an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The date when the money was spent.
    pub date: Date,
    /// The category label for the expense.
    pub category: String,
    /// The amount of money spent in dollars.
    pub amount: f64,
    /// Text detailing the expense.
    pub description: Option<String>,
}

impl ExpenseForm {
    /// Treat a blank description as no description at all.
    pub fn normalized_description(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_owned)
    }
}

/// A route handler for creating a new expense, redirects to the history view
/// on success.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> impl IntoResponse {
    let builder = Expense::build(form.date, &form.category, form.amount)
        .description(form.normalized_description());

    let connection = state.db_connection.lock().unwrap();

    if let Err(error) = create_expense(builder, &connection) {
        return error.into_response();
    }

    Redirect::to(endpoints::HISTORY_VIEW).into_response()
}
