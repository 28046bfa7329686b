use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".person-registry";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "registry.sqlite";
/// Environment variable that overrides the default database location.
const DB_PATH_ENV: &str = "PERSON_REGISTRY_DB";

/// Open the registry database, creating the file and schema on first run,
/// and return a live connection.
///
/// The connection is intentionally cheap to acquire: the front-end opens one
/// per command and drops it afterwards, so every operation releases the file
/// on all exit paths.
pub fn open_registry() -> Result<Connection> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Idempotently ensure the persons table exists. Split out from
/// [`open_registry`] so tests can run the same migration against an
/// in-memory database.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS persons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            national_id TEXT NOT NULL UNIQUE,
            gender TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL UNIQUE
        )",
        [],
    )
    .context("failed to create persons table")?;
    Ok(())
}

/// Resolve the absolute path to the SQLite database, honoring the
/// environment override before falling back to the user's home.
fn db_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(DB_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_init_is_idempotent() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        init_schema(&conn).expect("first init");
        init_schema(&conn).expect("second init");

        let columns: Vec<String> = conn
            .prepare("SELECT name FROM pragma_table_info('persons')")
            .expect("prepare pragma")
            .query_map([], |row| row.get(0))
            .expect("query pragma")
            .collect::<Result<_, _>>()
            .expect("collect columns");
        assert_eq!(
            columns,
            ["id", "name", "age", "national_id", "gender", "email", "phone"]
        );
    }
}
