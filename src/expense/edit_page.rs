//! Defines the route handler for the page that edits an existing expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use maud::html;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    endpoints::{self, format_endpoint},
    expense::core::get_expense,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    shared_templates::render,
};

use super::form::{ExpenseFormDefaults, expense_form_fields};

/// The state needed for the edit expense page.
#[derive(Debug, Clone)]
pub struct EditExpensePageState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing an expense, pre-filled with its current
/// field values.
pub async fn get_edit_expense_page(
    State(state): State<EditExpensePageState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = get_expense(expense_id, &connection)?;

    let nav_bar = NavBar::new(endpoints::HISTORY_VIEW).into_html();
    let today = OffsetDateTime::now_utc().date();

    let form_fields = expense_form_fields(&ExpenseFormDefaults {
        date: expense.date,
        category: Some(&expense.category),
        amount: Some(expense.amount),
        description: expense.description.as_deref(),
        max_date: today,
    });

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl my-4"
            {
                "Edit Expense"
            }

            form
                action=(format_endpoint(endpoints::UPDATE_EXPENSE, expense.id))
                method="post"
                class="space-y-4 w-full"
            {
                (form_fields)

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Save Changes"
                }
            }
        }
    );

    Ok(render(StatusCode::OK, base("Edit Expense", &[], &content)))
}
