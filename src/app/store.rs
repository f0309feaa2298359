//! Storage seam shared by the SQLite and in-memory backends.

use crate::domain::Item;
use crate::error::AppError;

/// Owner of the item collection.
///
/// Implementations must keep names unique under [`crate::domain::name_key`]
/// across both `create` and `update`, list in ascending id order, and never
/// hand out an id twice.
pub trait ItemStore: Send + Sync {
    /// All items, or only those whose name contains `filter` case-insensitively.
    fn list(&self, filter: &str) -> Result<Vec<Item>, AppError>;

    fn get(&self, id: i64) -> Result<Item, AppError>;

    fn create(&self, name: &str, description: &str) -> Result<Item, AppError>;

    /// Replace name and description. Renaming onto another item's name fails
    /// with `DuplicateName`; a case change of the item's own name is fine.
    fn update(&self, id: i64, name: &str, description: &str) -> Result<Item, AppError>;

    fn delete(&self, id: i64) -> Result<(), AppError>;
}
