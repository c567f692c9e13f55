//! Defines the endpoint for overwriting the fields of an existing expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{
    AppState, database_id::ExpenseId, endpoints,
    expense::core::{Expense, update_expense},
};

use super::create_endpoint::ExpenseForm;

/// The state needed to update an expense.
#[derive(Debug, Clone)]
pub struct UpdateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for updating an expense, redirects to the history view on
/// success.
///
/// Responds with 404 Not Found when the expense does not exist, rather than
/// silently succeeding.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn update_expense_endpoint(
    State(state): State<UpdateExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Form(form): Form<ExpenseForm>,
) -> impl IntoResponse {
    let builder = Expense::build(form.date, &form.category, form.amount)
        .description(form.normalized_description());

    let connection = state.db_connection.lock().unwrap();

    match update_expense(expense_id, builder, &connection) {
        Ok(_) => Redirect::to(endpoints::HISTORY_VIEW).into_response(),
        Err(error) => {
            tracing::error!("Could not update expense {expense_id}: {error}");
            error.into_response()
        }
    }
}
