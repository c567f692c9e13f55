//! Defines the endpoint for deleting an expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, alert::AlertTemplate, database_id::ExpenseId,
    expense::core::delete_expense, shared_templates::render,
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense, responds with an alert on failure.
///
/// The history table row targeting this endpoint is swapped with the empty
/// response body, removing the row in place.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match delete_expense(expense_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table
        // row. The alert is an out-of-band swap, so the row itself is
        // replaced with nothing.
        Ok(()) => render(
            StatusCode::OK,
            AlertTemplate::success("Expense deleted", "").into_html(),
        ),
        Err(error @ Error::DeleteMissingExpense) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            render(
                StatusCode::INTERNAL_SERVER_ERROR,
                AlertTemplate::error(
                    "Could not delete expense",
                    "An unexpected error occured. Try again later or check the logs on the server.",
                )
                .into_html(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Expense, count_expenses, create_expense},
    };

    use super::{DeleteExpenseState, delete_expense_endpoint};

    fn get_test_state() -> DeleteExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DeleteExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn deletes_expense() {
        let state = get_test_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build(date!(2024 - 01 - 05), "Food", 12.50),
                &connection,
            )
            .unwrap()
        };

        let response = delete_expense_endpoint(State(state.clone()), Path(expense.id))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn responds_not_found_for_missing_expense() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build(date!(2024 - 01 - 05), "Food", 12.50),
                &connection,
            )
            .unwrap();
        }

        let response = delete_expense_endpoint(State(state.clone()), Path(42))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The record set is unchanged.
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 1);
    }
}
