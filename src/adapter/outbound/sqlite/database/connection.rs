//! Read-only database connections using Diesel ORM.

use std::io::ErrorKind;
use std::path::Path;

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Build a `file:` URI that opens `path` read-only.
///
/// The path must exist; SQLite would otherwise report a generic open failure.
///
/// # Errors
/// Returns [`Error::DatabaseNotFound`] if the file does not exist.
pub fn read_only_url(path: &Path) -> Result<String> {
    let absolute = std::fs::canonicalize(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::DatabaseNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;

    let mut url = Url::from_file_path(&absolute).map_err(|()| {
        Error::Connection(format!(
            "cannot express {} as a file URI",
            absolute.display()
        ))
    })?;
    url.set_query(Some("mode=ro"));
    Ok(url.to_string())
}

/// Open the database at `path` read-only.
///
/// # Errors
/// Returns an error if the file is missing or SQLite refuses to open it.
pub fn open_read_only(path: &Path) -> Result<SqliteConnection> {
    let url = read_only_url(path)?;
    debug!(%url, "Opening database");
    let mut conn = SqliteConnection::establish(&url)?;
    configure_sqlite_connection(&mut conn)?;
    Ok(conn)
}

/// Configure SQLite connection pragmas used for report reads.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(conn: &mut SqliteConnection) -> Result<()> {
    diesel::sql_query("PRAGMA query_only = ON").execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_database_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");

        let err = read_only_url(&path).unwrap_err();
        assert!(matches!(err, Error::DatabaseNotFound { .. }));

        assert!(matches!(
            open_read_only(&path),
            Err(Error::DatabaseNotFound { .. })
        ));
    }

    #[test]
    fn url_is_read_only_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades with space.db");
        std::fs::write(&path, b"").unwrap();

        let url = read_only_url(&path).unwrap();
        assert!(url.starts_with("file:///"), "{url}");
        assert!(url.ends_with("?mode=ro"), "{url}");
        assert!(url.contains("trades%20with%20space.db"), "{url}");
    }

    #[test]
    fn read_only_connection_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.db");
        {
            let url = path.to_string_lossy().into_owned();
            let mut conn = SqliteConnection::establish(&url).unwrap();
            diesel::sql_query("CREATE TABLE t (x INTEGER)")
                .execute(&mut conn)
                .unwrap();
        }

        let mut conn = open_read_only(&path).unwrap();
        let result = diesel::sql_query("INSERT INTO t (x) VALUES (1)").execute(&mut conn);
        assert!(result.is_err());
    }

    #[test]
    fn empty_file_opens_as_empty_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        std::fs::write(&path, b"").unwrap();

        assert!(open_read_only(&path).is_ok());
    }
}
