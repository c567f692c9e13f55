//! Dashboard HTTP handlers and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    dashboard::{
        cards::summary_cards,
        charts::{DashboardChart, category_pie_chart, charts_script, charts_view, monthly_bar_chart},
    },
    endpoints,
    expense::{Expense, list_expenses},
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    summary::{category_summary, monthly_summary, total_spending},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with an overview of the user's spending.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not list expenses: {error}"))?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if expenses.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let total = total_spending(&expenses);
    let charts = build_dashboard_charts(&expenses);

    Ok(dashboard_view(nav_bar, total, expenses.len(), &charts).into_response())
}

/// Creates the array of dashboard charts from expense data.
///
/// The chart options are serialized to JSON for ECharts consumption.
fn build_dashboard_charts(expenses: &[Expense]) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "category-chart",
            options: category_pie_chart(&category_summary(expenses)).to_string(),
        },
        DashboardChart {
            id: "monthly-chart",
            options: monthly_bar_chart(&monthly_summary(expenses)).to_string(),
        },
    ]
}

/// Renders the dashboard page when no expenses have been recorded yet.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_expense_link = link(endpoints::NEW_EXPENSE_VIEW, "here");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you record some expenses.
                You can add your first expense " (new_expense_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with the summary cards and charts.
fn dashboard_view(
    nav_bar: NavBar,
    total_spending: f64,
    expense_count: usize,
    charts: &[DashboardChart],
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class=(PAGE_CONTAINER_STYLE)
        {
            (summary_cards(total_spending, expense_count))

            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}
