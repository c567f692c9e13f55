//! Database initialization for the application.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Create the application's tables if they do not already exist.
///
/// This function is idempotent and is called on every startup, both by
/// [crate::AppState::new] and by the `init_db` binary.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    Ok(())
}
