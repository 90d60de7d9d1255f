use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub text: String,
}

/// Opens the article store read-only. A missing file is an error rather than
/// a fresh empty database.
pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to open {:?}", path))?;
    Ok(conn)
}

pub fn fetch_articles(conn: &Connection) -> Result<Vec<Article>> {
    let mut stmt = conn
        .prepare("SELECT title, text FROM Articles")
        .context("Failed to query Articles")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Article {
                title: row.get(0)?,
                text: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read article row")?;
    Ok(rows)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    pub(crate) fn create_store(dir: &Path, articles: &[(&str, &str)]) -> PathBuf {
        let path = dir.join("artykuly.sqlite3");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE Articles (title TEXT, text TEXT);")
            .unwrap();
        for (title, text) in articles {
            conn.execute(
                "INSERT INTO Articles (title, text) VALUES (?1, ?2)",
                rusqlite::params![title, text],
            )
            .unwrap();
        }
        path
    }

    #[test]
    fn reads_rows_in_table_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_store(dir.path(), &[("Kot", "'''Kot''' mruczy"), ("Pies", "szczeka")]);
        let conn = connect(&path).unwrap();
        let articles = fetch_articles(&conn).unwrap();
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Kot", "Pies"]);
        assert_eq!(articles[0].text, "'''Kot''' mruczy");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.sqlite3");
        assert!(connect(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.sqlite3");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE Other (x TEXT);")
            .unwrap();
        let conn = connect(&path).unwrap();
        assert!(fetch_articles(&conn).is_err());
    }

    #[test]
    fn null_text_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_store(dir.path(), &[]);
        Connection::open(&path)
            .unwrap()
            .execute("INSERT INTO Articles (title, text) VALUES ('Pusty', NULL)", [])
            .unwrap();
        let conn = connect(&path).unwrap();
        assert!(fetch_articles(&conn).is_err());
    }
}
