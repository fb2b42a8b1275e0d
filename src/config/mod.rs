// Configuration module entry point
// Loads layered configuration and holds shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AssetsConfig, Config, HttpConfig, LoggingConfig, ServerConfig, StorageConfig,
};

impl Config {
    /// Load configuration from the default "config.toml" (if present),
    /// layered under `PAD_*` environment variables and coded defaults
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("PAD"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8998)?
            .set_default("server.read_timeout", 60)?
            .set_default("server.write_timeout", 60)?
            .set_default("storage.document_path", "data/pad.txt")?
            .set_default("assets.static_root", "static")?
            .set_default("assets.home_page", "static/index.html")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
