//! Runtime configuration: which store backend to run and where its data lives.

use crate::error::AppError;
use serde::Deserialize;
use std::path::PathBuf;

pub const ENV_STORE: &str = "ITEMDESK_STORE";
pub const ENV_DB_PATH: &str = "ITEMDESK_DB_PATH";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Sqlite,
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Some(Self::Sqlite),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreKind,
    pub db_path: Option<PathBuf>,
}

fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("itemdesk")
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        toml::from_str(s).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Read `ITEMDESK_STORE` and `ITEMDESK_DB_PATH`; unset keys keep defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_STORE) {
            cfg.store = StoreKind::from_str(&raw)
                .ok_or_else(|| AppError::Config(format!("unknown store '{}'", raw)))?;
        }
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            cfg.db_path = Some(PathBuf::from(path));
        }
        Ok(cfg)
    }

    /// Database file for the SQLite backend.
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| app_data_dir().join("items.db"))
    }
}
