//! View models handed to the presentation layer.

use crate::domain::{FlashMessage, Item};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    List {
        items: Vec<Item>,
        q: String,
        messages: Vec<FlashMessage>,
    },
    Create {
        messages: Vec<FlashMessage>,
    },
    Edit {
        item: Item,
        messages: Vec<FlashMessage>,
    },
}
