use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::Result;
use crate::models::{BotRecord, RepoType};

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_db()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS bots (
                full_name TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                author TEXT NOT NULL,
                description TEXT,
                link TEXT NOT NULL,
                category TEXT NOT NULL,
                language TEXT,
                stars INTEGER NOT NULL,
                forks INTEGER NOT NULL,
                open_issues INTEGER NOT NULL,
                last_updated TEXT NOT NULL,
                license TEXT NOT NULL,
                repo_type TEXT NOT NULL,
                what_it_does TEXT NOT NULL,
                how_to_use TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_bots_stars ON bots(stars);
            "#,
        )?;

        Ok(())
    }

    /// Upsert keyed by `full_name`: a re-synced repository replaces its prior
    /// row in place, so repeated batches never grow the table.
    pub fn upsert_all(&self, records: &[BotRecord]) -> Result<()> {
        for record in records {
            self.conn.execute(
                r#"
                INSERT INTO bots (full_name, name, author, description, link, category,
                                  language, stars, forks, open_issues, last_updated,
                                  license, repo_type, what_it_does, how_to_use)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
                ON CONFLICT(full_name) DO UPDATE SET
                    name = excluded.name,
                    author = excluded.author,
                    description = excluded.description,
                    link = excluded.link,
                    category = excluded.category,
                    language = excluded.language,
                    stars = excluded.stars,
                    forks = excluded.forks,
                    open_issues = excluded.open_issues,
                    last_updated = excluded.last_updated,
                    license = excluded.license,
                    repo_type = excluded.repo_type,
                    what_it_does = excluded.what_it_does,
                    how_to_use = excluded.how_to_use
                "#,
                params![
                    record.full_name,
                    record.name,
                    record.author,
                    record.description,
                    record.link,
                    record.category,
                    record.language,
                    record.stars,
                    record.forks,
                    record.open_issues,
                    record.last_updated,
                    record.license,
                    record.repo_type.as_str(),
                    record.what_it_does,
                    record.how_to_use,
                ],
            )?;
        }

        Ok(())
    }

    pub fn list_by_stars(&self) -> Result<Vec<BotRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT full_name, name, author, description, link, category, language,
                   stars, forks, open_issues, last_updated, license, repo_type,
                   what_it_does, how_to_use
            FROM bots
            ORDER BY stars DESC
            "#,
        )?;

        let records = stmt.query_map([], |row| {
            Ok(BotRecord {
                full_name: row.get(0)?,
                name: row.get(1)?,
                author: row.get(2)?,
                description: row.get(3)?,
                link: row.get(4)?,
                category: row.get(5)?,
                language: row.get(6)?,
                stars: row.get(7)?,
                forks: row.get(8)?,
                open_issues: row.get(9)?,
                last_updated: row.get(10)?,
                license: row.get(11)?,
                repo_type: RepoType::from(row.get::<_, String>(12)?),
                what_it_does: row.get(13)?,
                how_to_use: row.get(14)?,
            })
        })?;

        records
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    pub fn count(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM bots", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(full_name: &str, stars: u32, what_it_does: &str) -> BotRecord {
        let (author, name) = full_name.split_once('/').unwrap();
        BotRecord {
            name: name.to_string(),
            author: author.to_string(),
            full_name: full_name.to_string(),
            description: None,
            link: format!("https://github.com/{}", full_name),
            category: "telegram".to_string(),
            language: Some("Python".to_string()),
            stars,
            forks: 1,
            open_issues: 2,
            last_updated: "2024-01-01T00:00:00Z".to_string(),
            license: "MIT License".to_string(),
            repo_type: RepoType::Library,
            what_it_does: what_it_does.to_string(),
            how_to_use: "pip install".to_string(),
        }
    }

    #[test]
    fn upsert_twice_keeps_one_row_with_latest_fields() {
        let store = Store::in_memory().unwrap();

        store
            .upsert_all(&[record("acme/bot", 10, "first pass")])
            .unwrap();
        store
            .upsert_all(&[record("acme/bot", 12, "second pass")])
            .unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let rows = store.list_by_stars().unwrap();
        assert_eq!(rows[0].stars, 12);
        assert_eq!(rows[0].what_it_does, "second pass");
    }

    #[test]
    fn listing_orders_by_stars_descending() {
        let store = Store::in_memory().unwrap();
        store
            .upsert_all(&[
                record("a/low", 3, "x"),
                record("b/high", 900, "x"),
                record("c/mid", 40, "x"),
            ])
            .unwrap();

        let names: Vec<_> = store
            .list_by_stars()
            .unwrap()
            .into_iter()
            .map(|r| r.full_name)
            .collect();
        assert_eq!(names, vec!["b/high", "c/mid", "a/low"]);
    }

    #[test]
    fn round_trip_preserves_repo_type_and_optionals() {
        let store = Store::in_memory().unwrap();
        store.upsert_all(&[record("a/one", 1, "x")]).unwrap();

        let rows = store.list_by_stars().unwrap();
        assert_eq!(rows[0].repo_type, RepoType::Library);
        assert_eq!(rows[0].description, None);
        assert_eq!(rows[0].language.as_deref(), Some("Python"));
    }
}
