use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use spendlog::initialize_db;

/// A utility for creating the spendlog database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database.
    #[arg(long, short)]
    db_path: String,
}

/// Ensure the database at `db_path` exists and has the application's tables.
///
/// Safe to run against an existing database: table creation is a no-op when
/// the tables are already present.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let db_path = Path::new(&args.db_path);

    match db_path.extension() {
        None => {
            eprintln!("Database path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Database path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    init_database(db_path)?;

    println!("Success!");

    Ok(())
}

fn init_database(db_path: &Path) -> Result<(), Box<dyn Error>> {
    if db_path.is_file() {
        println!("Using existing database at {db_path:#?}");
    } else {
        println!("Creating database at {db_path:#?}");
    }

    let conn = Connection::open(db_path)?;
    initialize_db(&conn)?;

    Ok(())
}

#[cfg(test)]
mod init_database_tests {
    use std::fs;
    use std::path::PathBuf;

    use super::init_database;

    fn temp_db_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{name}_{}.db", std::process::id()))
    }

    #[test]
    fn second_run_against_existing_database_succeeds() {
        let db_path = temp_db_path("init_db_rerun");
        let _ = fs::remove_file(&db_path);

        init_database(&db_path).expect("First run should create the database");
        assert!(db_path.is_file());

        init_database(&db_path).expect("Second run should be a no-op, not an error");

        fs::remove_file(&db_path).unwrap();
    }
}
