//! Request handlers. Store outcomes become flash messages plus a redirect.

use crate::app::{
    item_create, item_delete, item_get, item_list, item_update, ItemCreateReq, ItemListReq,
    ItemStore, ItemUpdateReq,
};
use crate::domain::FlashMessage;
use crate::error::AppError;
use crate::infra::FlashSlot;
use crate::web::views::View;
use crate::web::Reply;

pub const LIST_PATH: &str = "/";
pub const NEW_PATH: &str = "/items/new";

pub fn edit_path(id: i64) -> String {
    format!("/items/{}/edit", id)
}

fn duplicate_text(name: &str) -> String {
    format!("An item named '{}' already exists", name)
}

fn not_found_text(id: i64) -> String {
    format!("Item with ID {} not found.", id)
}

fn flash_redirect(
    flash: &FlashSlot<'_>,
    message: FlashMessage,
    location: impl Into<String>,
) -> Result<Reply, AppError> {
    flash.set(vec![message])?;
    Ok(Reply::SeeOther(location.into()))
}

pub fn list_items(
    store: &dyn ItemStore,
    flash: &FlashSlot<'_>,
    q: Option<String>,
) -> Result<Reply, AppError> {
    let messages = flash.drain()?;
    let q = q.unwrap_or_default();
    let items = item_list(store, ItemListReq { q: Some(q.clone()) })?;
    Ok(Reply::Page(View::List { items, q, messages }))
}

pub fn new_item_form(flash: &FlashSlot<'_>) -> Result<Reply, AppError> {
    let messages = flash.drain()?;
    Ok(Reply::Page(View::Create { messages }))
}

pub fn create_item(
    store: &dyn ItemStore,
    flash: &FlashSlot<'_>,
    req: ItemCreateReq,
) -> Result<Reply, AppError> {
    let name = req.name.clone();
    match item_create(store, req) {
        Ok(_) => flash_redirect(
            flash,
            FlashMessage::success("Item created successfully!"),
            LIST_PATH,
        ),
        Err(AppError::DuplicateName(_)) => {
            flash_redirect(flash, FlashMessage::error(duplicate_text(&name)), NEW_PATH)
        }
        Err(e) => Err(e),
    }
}

pub fn edit_item_form(
    store: &dyn ItemStore,
    flash: &FlashSlot<'_>,
    id: i64,
) -> Result<Reply, AppError> {
    match item_get(store, id) {
        Ok(item) => {
            let messages = flash.drain()?;
            Ok(Reply::Page(View::Edit { item, messages }))
        }
        Err(AppError::NotFound(_)) => {
            flash_redirect(flash, FlashMessage::error(not_found_text(id)), LIST_PATH)
        }
        Err(e) => Err(e),
    }
}

pub fn update_item(
    store: &dyn ItemStore,
    flash: &FlashSlot<'_>,
    req: ItemUpdateReq,
) -> Result<Reply, AppError> {
    let (id, name) = (req.id, req.name.clone());
    match item_update(store, req) {
        Ok(_) => flash_redirect(
            flash,
            FlashMessage::success("Item updated successfully!"),
            LIST_PATH,
        ),
        Err(AppError::NotFound(_)) => {
            flash_redirect(flash, FlashMessage::error(not_found_text(id)), LIST_PATH)
        }
        Err(AppError::DuplicateName(_)) => {
            flash_redirect(flash, FlashMessage::error(duplicate_text(&name)), edit_path(id))
        }
        Err(e) => Err(e),
    }
}

pub fn delete_item(
    store: &dyn ItemStore,
    flash: &FlashSlot<'_>,
    id: i64,
) -> Result<Reply, AppError> {
    match item_delete(store, id) {
        Ok(()) => flash_redirect(
            flash,
            FlashMessage::success("Item deleted successfully!"),
            LIST_PATH,
        ),
        Err(AppError::NotFound(_)) => {
            flash_redirect(flash, FlashMessage::error(not_found_text(id)), LIST_PATH)
        }
        Err(e) => Err(e),
    }
}
