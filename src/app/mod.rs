//! Application use cases.

mod item;
mod store;

pub use item::{
    item_create, item_delete, item_get, item_list, item_update, ItemCreateReq, ItemListReq,
    ItemUpdateReq,
};
pub use store::ItemStore;
