/// Application settings loaded from config.toml
pub mod app;

/// Database configuration and connection management
pub mod database;

pub use app::{AppConfig, ChatbotConfig, SiteConfig, StorageConfig, load_app_config};
