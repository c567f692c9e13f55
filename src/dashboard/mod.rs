//! The dashboard page, which gives an overview of your spending.
//!
//! The dashboard shows a total-spending card alongside two ECharts
//! visualizations: spending by category (pie) and spending by month (bar).

mod cards;
mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
