//! Defines the route handlers for downloading the expense history as CSV.
//!
//! Two flavours are served: one that formats amounts for people
//! (`$1,234.56`) and one with plain two-decimal numbers for other programs.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::core::{Expense, list_expenses},
    html::format_currency,
};

/// The state needed for the CSV export handlers.
#[derive(Debug, Clone)]
pub struct ExportCsvState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExportCsvState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Download the expense history as CSV with amounts formatted as currency,
/// e.g. `$12.34`.
pub async fn export_csv(State(state): State<ExportCsvState>) -> Result<Response, Error> {
    let expenses = fetch_expenses(&state)?;
    let csv = write_csv(&expenses, |expense| format_currency(expense.amount))?;

    Ok(csv_response(csv, "expenses.csv"))
}

/// Download the expense history as CSV with plain two-decimal amounts,
/// e.g. `12.34`.
pub async fn export_csv_raw(State(state): State<ExportCsvState>) -> Result<Response, Error> {
    let expenses = fetch_expenses(&state)?;
    let csv = write_csv(&expenses, |expense| format!("{:.2}", expense.amount))?;

    Ok(csv_response(csv, "expenses_raw.csv"))
}

fn fetch_expenses(state: &ExportCsvState) -> Result<Vec<Expense>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    list_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not list expenses: {error}"))
}

fn write_csv(
    expenses: &[Expense],
    format_amount: impl Fn(&Expense) -> String,
) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Date", "Category", "Amount", "Description"])
        .map_err(|error| Error::ExportError(error.to_string()))?;

    for expense in expenses {
        writer
            .write_record([
                expense.date.to_string(),
                expense.category.clone(),
                format_amount(expense),
                expense.description.clone().unwrap_or_default(),
            ])
            .map_err(|error| Error::ExportError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::ExportError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::ExportError(error.to_string()))
}

fn csv_response(csv: String, file_name: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    )
        .into_response()
}

#[cfg(test)]
mod export_csv_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode, header},
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Expense, create_expense},
    };

    use super::{ExportCsvState, export_csv, export_csv_raw};

    fn get_test_state() -> ExportCsvState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        {
            create_expense(
                Expense::build(date!(2024 - 01 - 05), "Food", 12.50)
                    .description(Some("Lunch, with coffee".to_owned())),
                &conn,
            )
            .unwrap();
            create_expense(Expense::build(date!(2024 - 02 - 10), "Transport", 7.5), &conn).unwrap();
        }

        ExportCsvState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn display_export_formats_amounts_as_currency() {
        let state = get_test_state();

        let response = export_csv(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_csv_headers(&response, "expenses.csv");

        let text = body_text(response).await;
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Date,Category,Amount,Description"));
        assert_eq!(lines.next(), Some("2024-02-10,Transport,$7.50,"));
        assert_eq!(
            lines.next(),
            Some("2024-01-05,Food,$12.50,\"Lunch, with coffee\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn raw_export_uses_plain_two_decimal_amounts() {
        let state = get_test_state();

        let response = export_csv_raw(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_csv_headers(&response, "expenses_raw.csv");

        let text = body_text(response).await;
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Date,Category,Amount,Description"));
        assert_eq!(lines.next(), Some("2024-02-10,Transport,7.50,"));
        assert_eq!(
            lines.next(),
            Some("2024-01-05,Food,12.50,\"Lunch, with coffee\"")
        );
    }

    #[tokio::test]
    async fn export_with_no_expenses_contains_only_the_header() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let state = ExportCsvState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = export_csv(State(state)).await.unwrap();

        let text = body_text(response).await;
        assert_eq!(text.trim_end(), "Date,Category,Amount,Description");
    }

    #[track_caller]
    fn assert_csv_headers(response: &Response<Body>, file_name: &str) {
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            format!("attachment; filename=\"{file_name}\"").as_str()
        );
    }

    async fn body_text(response: Response<Body>) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8_lossy(&body).to_string()
    }
}
