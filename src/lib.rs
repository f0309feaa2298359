pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod web;

pub use config::{AppConfig, StoreKind};
pub use error::AppError;
pub use web::App;

/// Build the application from `ITEMDESK_*` environment variables.
///
/// The crate opens no socket: the embedding process owns the listener and
/// feeds each request to [`App::handle`], as it also owns the logger.
pub fn app_from_env() -> Result<App, AppError> {
    let config = AppConfig::from_env()?;
    App::from_config(&config)
}
