//! `ItemStore` over the SQLite pool.

use crate::app::ItemStore;
use crate::domain::{name_key, Item};
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::{params, OptionalExtension, Row};

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

impl ItemStore for DbPool {
    fn list(&self, filter: &str) -> Result<Vec<Item>, AppError> {
        let conn = get_connection(self)?;
        let mut stmt;
        let rows = if filter.is_empty() {
            stmt = conn.prepare("SELECT id, name, description FROM items ORDER BY id")?;
            stmt.query_map([], item_from_row)?
        } else {
            stmt = conn.prepare(
                "SELECT id, name, description FROM items WHERE instr(name_key, ?1) > 0 ORDER BY id",
            )?;
            stmt.query_map([name_key(filter)], item_from_row)?
        };
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn get(&self, id: i64) -> Result<Item, AppError> {
        let conn = get_connection(self)?;
        conn.query_row(
            "SELECT id, name, description FROM items WHERE id = ?1",
            [id],
            item_from_row,
        )
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("item {}", id)))
    }

    fn create(&self, name: &str, description: &str) -> Result<Item, AppError> {
        let key = name_key(name);
        let mut conn = get_connection(self)?;
        let tx = conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row("SELECT id FROM items WHERE name_key = ?1", [&key], |r| r.get(0))
            .optional()?;
        if existing.is_some() {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        tx.execute(
            "INSERT INTO items (name, name_key, description) VALUES (?1, ?2, ?3)",
            params![name, &key, description],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Item {
            id,
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    fn update(&self, id: i64, name: &str, description: &str) -> Result<Item, AppError> {
        let key = name_key(name);
        let mut conn = get_connection(self)?;
        let tx = conn.transaction()?;

        let found: Option<i64> = tx
            .query_row("SELECT id FROM items WHERE id = ?1", [id], |r| r.get(0))
            .optional()?;
        if found.is_none() {
            return Err(AppError::NotFound(format!("item {}", id)));
        }

        let clash: Option<i64> = tx
            .query_row(
                "SELECT id FROM items WHERE name_key = ?1 AND id != ?2",
                params![&key, id],
                |r| r.get(0),
            )
            .optional()?;
        if clash.is_some() {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        tx.execute(
            "UPDATE items SET name = ?1, name_key = ?2, description = ?3 WHERE id = ?4",
            params![name, &key, description, id],
        )?;
        tx.commit()?;

        Ok(Item {
            id,
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    fn delete(&self, id: i64) -> Result<(), AppError> {
        let conn = get_connection(self)?;
        let n = conn.execute("DELETE FROM items WHERE id = ?1", [id])?;
        if n == 0 {
            return Err(AppError::NotFound(format!("item {}", id)));
        }
        Ok(())
    }
}
