//! SQLite-backed storage for task blocks and the category directory.
//!
//! Blocks are keyed by day (`YYYY-MM-DD`) and kept in insertion order so
//! the compute functions see the same snapshot ordering the user built.
//! The recurrence rule is stored as a JSON column.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::error::{CoreError, DatabaseError};
use crate::plan::TaskBlock;
use crate::stats::CategoryEntry;

/// SQLite database holding the day plans.
pub struct PlanDb {
    conn: Connection,
}

impl PlanDb {
    /// Open the database at `data_dir()/dayplan.db`.
    ///
    /// Creates the file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("dayplan.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path,
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS blocks (
                id           TEXT PRIMARY KEY,
                day          TEXT NOT NULL,
                label        TEXT NOT NULL DEFAULT '',
                start_time   TEXT NOT NULL,
                end_time     TEXT NOT NULL,
                completed    INTEGER NOT NULL DEFAULT 0,
                category_ref TEXT,
                recurrence   TEXT,
                position     INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS categories (
                id       TEXT PRIMARY KEY,
                title    TEXT NOT NULL,
                icon     TEXT,
                position INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_blocks_day ON blocks(day);",
        )?;
        Ok(())
    }

    /// Insert a block for the given day, appended after existing blocks.
    ///
    /// # Errors
    /// Returns an error if the insert or recurrence serialization fails.
    pub fn insert_block(&self, day: NaiveDate, block: &TaskBlock) -> Result<(), CoreError> {
        let recurrence = block
            .recurrence
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let position: i64 = self
            .conn
            .query_row(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM blocks WHERE day = ?1",
                params![day.to_string()],
                |row| row.get(0),
            )
            .map_err(DatabaseError::from)?;

        self.conn
            .execute(
                "INSERT INTO blocks (id, day, label, start_time, end_time, completed, category_ref, recurrence, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    block.id,
                    day.to_string(),
                    block.label,
                    block.start,
                    block.end,
                    block.completed,
                    block.category_ref,
                    recurrence,
                    position,
                ],
            )
            .map_err(DatabaseError::from)?;
        tracing::debug!(id = %block.id, %day, "inserted block");
        Ok(())
    }

    /// List the blocks of a day in insertion order.
    ///
    /// # Errors
    /// Returns an error if the query or a recurrence decode fails.
    pub fn list_blocks(&self, day: NaiveDate) -> Result<Vec<TaskBlock>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, label, start_time, end_time, completed, category_ref, recurrence
                 FROM blocks WHERE day = ?1 ORDER BY position",
            )
            .map_err(DatabaseError::from)?;

        let rows = stmt
            .query_map(params![day.to_string()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, bool>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, Option<String>>(6)?,
                ))
            })
            .map_err(DatabaseError::from)?;

        let mut blocks = Vec::new();
        for row in rows {
            let (id, label, start, end, completed, category_ref, recurrence) =
                row.map_err(DatabaseError::from)?;
            let recurrence = recurrence
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?;
            blocks.push(TaskBlock {
                id,
                label,
                start,
                end,
                completed,
                category_ref,
                recurrence,
            });
        }
        Ok(blocks)
    }

    /// Toggle completion on a block.
    ///
    /// # Errors
    /// Returns [`DatabaseError::NotFound`] if no block has this id.
    pub fn set_completed(&self, id: &str, completed: bool) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE blocks SET completed = ?2 WHERE id = ?1",
                params![id, completed],
            )
            .map_err(DatabaseError::from)?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(id.to_string()).into());
        }
        Ok(())
    }

    /// Update label and/or times of a block; `None` leaves a field as is.
    ///
    /// # Errors
    /// Returns [`DatabaseError::NotFound`] if no block has this id.
    pub fn update_block(
        &self,
        id: &str,
        label: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE blocks SET
                    label      = COALESCE(?2, label),
                    start_time = COALESCE(?3, start_time),
                    end_time   = COALESCE(?4, end_time)
                 WHERE id = ?1",
                params![id, label, start, end],
            )
            .map_err(DatabaseError::from)?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(id.to_string()).into());
        }
        tracing::debug!(%id, "updated block");
        Ok(())
    }

    /// Delete a block.
    ///
    /// # Errors
    /// Returns [`DatabaseError::NotFound`] if no block has this id.
    pub fn delete_block(&self, id: &str) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM blocks WHERE id = ?1", params![id])
            .map_err(DatabaseError::from)?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(id.to_string()).into());
        }
        Ok(())
    }

    /// Fetch a single block by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_block(&self, id: &str) -> Result<Option<TaskBlock>, CoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, label, start_time, end_time, completed, category_ref, recurrence
                 FROM blocks WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, bool>(4)?,
                        row.get::<_, Option<String>>(5)?,
                        row.get::<_, Option<String>>(6)?,
                    ))
                },
            )
            .optional()
            .map_err(DatabaseError::from)?;

        match row {
            None => Ok(None),
            Some((id, label, start, end, completed, category_ref, recurrence)) => {
                let recurrence = recurrence
                    .as_deref()
                    .map(serde_json::from_str)
                    .transpose()?;
                Ok(Some(TaskBlock {
                    id,
                    label,
                    start,
                    end,
                    completed,
                    category_ref,
                    recurrence,
                }))
            }
        }
    }

    /// Insert or update a directory category, keeping its position when
    /// it already exists.
    ///
    /// # Errors
    /// Returns an error if the upsert fails.
    pub fn upsert_category(&self, entry: &CategoryEntry) -> Result<(), CoreError> {
        let position: i64 = self
            .conn
            .query_row(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM categories",
                [],
                |row| row.get(0),
            )
            .map_err(DatabaseError::from)?;
        self.conn
            .execute(
                "INSERT INTO categories (id, title, icon, position) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET title = excluded.title, icon = excluded.icon",
                params![entry.id, entry.title, entry.icon, position],
            )
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    /// List directory categories in position order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_categories(&self) -> Result<Vec<CategoryEntry>, CoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, icon FROM categories ORDER BY position")
            .map_err(DatabaseError::from)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CategoryEntry {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    icon: row.get(2)?,
                })
            })
            .map_err(DatabaseError::from)?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row.map_err(DatabaseError::from)?);
        }
        Ok(categories)
    }

    /// Delete a directory category.
    ///
    /// # Errors
    /// Returns [`DatabaseError::NotFound`] if no category has this id.
    pub fn delete_category(&self, id: &str) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])
            .map_err(DatabaseError::from)?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(id.to_string()).into());
        }
        Ok(())
    }
}
