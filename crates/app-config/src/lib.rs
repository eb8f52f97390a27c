// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, FileFormat};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, ProviderSettings, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file, if present.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let builder = Config::builder()
        .add_source(File::with_name("config/base").required(false))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        // e.g. `APP__PROVIDER__API_KEY=...`
        .add_source(Environment::with_prefix("APP").prefix_separator("__").separator("__").try_parsing(true));

    finish(builder)
}

/// Loads settings from a TOML string, with no files or environment involved.
pub fn load_settings_from_str(toml: &str) -> Result<Settings> {
    finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
}

fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Settings> {
    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.strategy.validate()?;
    Ok(settings)
}
