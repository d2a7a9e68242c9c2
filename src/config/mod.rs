/// Database configuration and connection management
pub mod database;

/// Floor layout loading from config.toml
pub mod floors;
