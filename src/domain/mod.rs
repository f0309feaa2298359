//! Domain types: items and flash notices.

pub mod flash;
pub mod item;

pub use flash::{FlashKind, FlashMessage};
pub use item::{name_key, Item};
