// In crates/app-config/src/types.rs

use serde::Deserialize;

use strategies::types::MACrossoverSettings;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Where daily prices are fetched from. Only needed for live runs.
    #[serde(default)]
    pub provider: Option<ProviderSettings>,
    /// Windows and policies for the moving-average crossover.
    #[serde(default)]
    pub strategy: MACrossoverSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application, in `EnvFilter` syntax.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

/// Settings for the Alpha Vantage price provider.
#[derive(Deserialize, Clone)]
pub struct ProviderSettings {
    /// The asset to fetch (e.g., "SOL").
    pub symbol: String,
    /// The market the asset is quoted in (e.g., "USD").
    #[serde(default = "default_market")]
    pub market: String,
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP timeout for a single request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("symbol", &self.symbol)
            .field("market", &self.market)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Helper functions for serde defaults
fn default_environment() -> String { "development".into() }
fn default_log_level() -> String { "info".into() }
fn default_market() -> String { "USD".into() }
fn default_base_url() -> String { "https://www.alphavantage.co".into() }
fn default_timeout_secs() -> u64 { 30 }
