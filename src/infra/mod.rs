//! Infrastructure: SQLite connection, migrations, store backends, flash registry.

pub mod db;
pub mod flash;
mod memory_store;
mod sqlite_store;

pub(crate) use db::get_connection;
pub use db::{init_db, DbPool};
pub use flash::{FlashRegistry, FlashSlot, DEFAULT_FLASH_CAPACITY, DEFAULT_FLASH_TTL};
pub use memory_store::MemoryItemStore;
