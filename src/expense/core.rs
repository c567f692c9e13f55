//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::ExpenseId};

/// The categories offered by the expense form.
///
/// The category set is open: the database accepts any label, this list only
/// drives the select input in the UI.
pub const CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Other",
];

// ============================================================================
// MODELS
// ============================================================================

/// A single expense, i.e. an event where money was spent.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// When the money was spent.
    pub date: Date,
    /// The category the expense belongs to, e.g. "Food", "Transport".
    pub category: String,
    /// The amount of money spent, always greater than zero.
    pub amount: f64,
    /// An optional text description of what the expense was for.
    pub description: Option<String>,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(date: Date, category: &str, amount: f64) -> ExpenseBuilder {
        ExpenseBuilder {
            date,
            category: category.to_owned(),
            amount,
            description: None,
        }
    }
}

/// A builder holding the mutable fields of an [Expense].
///
/// Used both for creating new expenses and for overwriting an existing row
/// via [update_expense].
#[derive(Debug, PartialEq, Clone)]
pub struct ExpenseBuilder {
    /// The date when the money was spent.
    pub date: Date,

    /// The category label. The UI offers the fixed list in [CATEGORIES] but
    /// any label is accepted here.
    pub category: String,

    /// The amount of money spent in dollars. Must be greater than zero.
    pub amount: f64,

    /// An optional description of the expense.
    pub description: Option<String>,
}

impl ExpenseBuilder {
    /// Set the description for the expense.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Check that the builder's fields describe a valid expense.
    ///
    /// # Errors
    /// Returns an [Error::NonPositiveAmount] if the amount is zero or negative.
    fn validate(&self) -> Result<(), Error> {
        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the amount is zero or negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(builder: ExpenseBuilder, connection: &Connection) -> Result<Expense, Error> {
    builder.validate()?;

    let expense = connection
        .prepare(
            "INSERT INTO expenses (date, category, amount, description)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, date, category, amount, description",
        )?
        .query_row(
            (
                builder.date,
                builder.category,
                builder.amount,
                builder.description,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, date, category, amount, description FROM expenses WHERE id = :id")?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Retrieve every expense in the database, sorted by date descending.
///
/// Expenses with the same date keep their insertion order.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn list_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, date, category, amount, description FROM expenses
             ORDER BY date DESC, id ASC",
        )?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// Overwrite the mutable fields of the expense with the given `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the new amount is zero or negative,
/// - [Error::UpdateMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    builder: ExpenseBuilder,
    connection: &Connection,
) -> Result<Expense, Error> {
    builder.validate()?;

    connection
        .prepare(
            "UPDATE expenses
             SET date = ?1, category = ?2, amount = ?3, description = ?4
             WHERE id = ?5
             RETURNING id, date, category, amount, description",
        )?
        .query_row(
            (
                builder.date,
                builder.category,
                builder.amount,
                builder.description,
                id,
            ),
            map_expense_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingExpense,
            error => error.into(),
        })
}

/// Remove the expense with the given `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expenses WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expenses table in the database if it does not already exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let category = row.get(2)?;
    let amount = row.get(3)?;
    let description = row.get(4)?;

    Ok(Expense {
        id,
        date,
        category,
        amount,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================
