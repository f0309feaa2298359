//! Item use cases.

use crate::app::ItemStore;
use crate::domain::Item;
use crate::error::AppError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ItemCreateReq {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemUpdateReq {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListReq {
    pub q: Option<String>,
}

pub fn item_list(store: &dyn ItemStore, req: ItemListReq) -> Result<Vec<Item>, AppError> {
    store.list(req.q.as_deref().unwrap_or(""))
}

pub fn item_get(store: &dyn ItemStore, id: i64) -> Result<Item, AppError> {
    store.get(id)
}

pub fn item_create(store: &dyn ItemStore, req: ItemCreateReq) -> Result<Item, AppError> {
    match store.create(&req.name, &req.description) {
        Ok(item) => {
            log::info!("item {} created ({:?})", item.id, item.name);
            Ok(item)
        }
        Err(e) => {
            log::warn!("item create rejected: {}", e);
            Err(e)
        }
    }
}

pub fn item_update(store: &dyn ItemStore, req: ItemUpdateReq) -> Result<Item, AppError> {
    match store.update(req.id, &req.name, &req.description) {
        Ok(item) => {
            log::info!("item {} updated", item.id);
            Ok(item)
        }
        Err(e) => {
            log::warn!("item {} update rejected: {}", req.id, e);
            Err(e)
        }
    }
}

pub fn item_delete(store: &dyn ItemStore, id: i64) -> Result<(), AppError> {
    store.delete(id).map_err(|e| {
        log::warn!("item {} delete rejected: {}", id, e);
        e
    })?;
    log::info!("item {} deleted", id);
    Ok(())
}
