use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Address to bind the HTTP listener to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind the HTTP listener to
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the JSON data files and the upload area
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Timeout for fetching external recipe pages, in seconds
    #[serde(default = "default_import_timeout")]
    pub import_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            import_timeout_secs: default_import_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_import_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with DINNERTIME__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: DINNERTIME__DATA_DIR
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("DINNERTIME")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
