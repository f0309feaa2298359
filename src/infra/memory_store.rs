//! `ItemStore` kept entirely in process memory.

use crate::app::ItemStore;
use crate::domain::{name_key, Item};
use crate::error::AppError;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct Inner {
    next_id: i64,
    // insertion order == ascending id
    items: Vec<Item>,
}

#[derive(Debug)]
pub struct MemoryItemStore(Mutex<Inner>);

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self(Mutex::new(Inner {
            next_id: 1,
            items: Vec::new(),
        }))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AppError> {
        self.0
            .lock()
            .map_err(|_| AppError::Db("item store lock poisoned".into()))
    }
}

impl Inner {
    fn position(&self, id: i64) -> Result<usize, AppError> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| AppError::NotFound(format!("item {}", id)))
    }

    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        let key = name_key(name);
        self.items
            .iter()
            .any(|i| Some(i.id) != except && name_key(&i.name) == key)
    }
}

impl ItemStore for MemoryItemStore {
    fn list(&self, filter: &str) -> Result<Vec<Item>, AppError> {
        let inner = self.lock()?;
        Ok(inner
            .items
            .iter()
            .filter(|i| i.matches_filter(filter))
            .cloned()
            .collect())
    }

    fn get(&self, id: i64) -> Result<Item, AppError> {
        let inner = self.lock()?;
        let pos = inner.position(id)?;
        Ok(inner.items[pos].clone())
    }

    fn create(&self, name: &str, description: &str) -> Result<Item, AppError> {
        let mut inner = self.lock()?;
        if inner.name_taken(name, None) {
            return Err(AppError::DuplicateName(name.to_string()));
        }
        let item = Item {
            id: inner.next_id,
            name: name.to_string(),
            description: description.to_string(),
        };
        inner.next_id += 1;
        inner.items.push(item.clone());
        Ok(item)
    }

    fn update(&self, id: i64, name: &str, description: &str) -> Result<Item, AppError> {
        let mut inner = self.lock()?;
        let pos = inner.position(id)?;
        if inner.name_taken(name, Some(id)) {
            return Err(AppError::DuplicateName(name.to_string()));
        }
        let item = &mut inner.items[pos];
        item.name = name.to_string();
        item.description = description.to_string();
        Ok(item.clone())
    }

    fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        let pos = inner.position(id)?;
        inner.items.remove(pos);
        Ok(())
    }
}
