//! Expense management for the application.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and `ExpenseBuilder` for creating expenses
//! - Database functions for storing, querying, and managing expenses
//! - View handlers for expense-related web pages and the CSV export

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_page;
mod export;
mod form;
mod history_page;
mod new_expense_page;
mod update_endpoint;

pub use core::{
    CATEGORIES, Expense, ExpenseBuilder, create_expense, create_expense_table, delete_expense,
    get_expense, list_expenses, update_expense,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_page::get_edit_expense_page;
pub use export::{export_csv, export_csv_raw};
pub use history_page::get_history_page;
pub use new_expense_page::get_new_expense_page;
pub use update_endpoint::update_expense_endpoint;

#[cfg(test)]
pub use core::count_expenses;
