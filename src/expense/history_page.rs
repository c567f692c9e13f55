//! Defines the route handler for the page that displays the expense history
//! as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::core::{Expense, list_expenses},
    html::{
        BUTTON_DELETE_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency, link,
    },
    navigation::NavBar,
    shared_templates::render,
};

/// The state needed for the history page.
#[derive(Debug, Clone)]
pub struct HistoryPageState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HistoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the expense history as a table, newest expenses first.
pub async fn get_history_page(State(state): State<HistoryPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not list expenses: {error}"))?;

    let nav_bar = NavBar::new(endpoints::HISTORY_VIEW);

    Ok(render(StatusCode::OK, history_view(nav_bar, &expenses)))
}

fn history_view(nav_bar: NavBar, expenses: &[Expense]) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl my-4"
            {
                "Expense History"
            }

            @if expenses.is_empty() {
                p
                {
                    "No expense history found. You can add expenses "
                    (link(endpoints::NEW_EXPENSE_VIEW, "here"))
                    "."
                }
            } @else {
                div class="relative overflow-x-auto rounded-lg shadow"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for expense in expenses {
                                (expense_table_row(expense))
                            }
                        }
                    }
                }

                div class="flex gap-4 my-4"
                {
                    (link(endpoints::EXPORT_CSV, "Download as CSV"))
                    (link(endpoints::EXPORT_CSV_RAW, "Download as CSV (machine-readable)"))
                }
            }
        }
    );

    base("History", &[], &content)
}

fn expense_table_row(expense: &Expense) -> Markup {
    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (expense.date) }
            td class=(TABLE_CELL_STYLE) { (expense.category) }
            td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE) { (expense.description.as_deref().unwrap_or("")) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (link(&format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id), "Edit"))

                    button
                        type="button"
                        class=(BUTTON_DELETE_STYLE)
                        hx-delete=(format_endpoint(endpoints::DELETE_EXPENSE, expense.id))
                        hx-target="closest tr"
                        hx-target-error="#alert-container"
                        hx-swap="outerHTML"
                        hx-confirm="Are you sure you want to delete this expense?"
                    {
                        "Delete"
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Expense, create_expense},
    };

    use super::{HistoryPageState, get_history_page};

    fn get_test_state() -> HistoryPageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        HistoryPageState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn history_table_lists_expenses_newest_first() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build(date!(2024 - 01 - 05), "Food", 12.50)
                    .description(Some("Lunch".to_owned())),
                &connection,
            )
            .unwrap();
            create_expense(
                Expense::build(date!(2024 - 02 - 10), "Transport", 7.50),
                &connection,
            )
            .unwrap();
        }

        let response = get_history_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html(response).await;
        assert_valid_html(&document);

        let row_selector = Selector::parse("tbody tr").unwrap();
        let rows: Vec<String> = document
            .select(&row_selector)
            .map(|row| row.text().collect())
            .collect();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("2024-02-10"), "Newest row should be first");
        assert!(rows[0].contains("$7.50"));
        assert!(rows[1].contains("2024-01-05"));
        assert!(rows[1].contains("Lunch"));
    }

    #[tokio::test]
    async fn history_rows_have_edit_and_delete_actions() {
        let state = get_test_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build(date!(2024 - 01 - 05), "Food", 12.50),
                &connection,
            )
            .unwrap()
        };

        let response = get_history_page(State(state)).await.unwrap();
        let document = parse_html(response).await;

        let edit_selector =
            Selector::parse(&format!("a[href='/expenses/{}/edit']", expense.id)).unwrap();
        assert!(
            document.select(&edit_selector).next().is_some(),
            "Missing edit link"
        );

        let delete_selector = Selector::parse("button[hx-delete]").unwrap();
        let delete_button = document
            .select(&delete_selector)
            .next()
            .expect("Missing delete button");
        assert_eq!(
            delete_button.value().attr("hx-delete"),
            Some(format!("/api/expenses/{}", expense.id).as_str())
        );
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let state = get_test_state();

        let response = get_history_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html(response).await;

        let table_selector = Selector::parse("table").unwrap();
        assert!(
            document.select(&table_selector).next().is_none(),
            "Empty history should not render a table"
        );

        let text: String = document.root_element().text().collect();
        assert!(text.contains("No expense history found"));
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }
}
