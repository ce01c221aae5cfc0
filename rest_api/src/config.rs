// rest_api/src/config.rs

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATASET_PATH: &str = "Training.csv";
pub const DEFAULT_CONFIG_FILE: &str = "symptom_checker.toml";

/// Names the optional config file to read instead of `DEFAULT_CONFIG_FILE`.
pub const CONFIG_FILE_ENV: &str = "SYMPTOM_CHECKER_CONFIG";
/// Prefix of environment overrides, e.g. `SYMPTOM_CHECKER_DATASET_PATH`.
pub const ENV_PREFIX: &str = "SYMPTOM_CHECKER";
/// Plain port variable set by most hosting platforms; wins over everything else.
pub const PORT_ENV: &str = "PORT";

/// Settings for the prediction server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RestApiConfig {
    pub host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    /// Raises the default log level to `debug`.
    pub debug: bool,
}

impl RestApiConfig {
    pub fn bind_address(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid host address '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            debug: false,
        }
    }
}

/// Loads the configuration from defaults, the optional TOML file and the
/// process environment.
pub fn load_rest_api_config() -> Result<RestApiConfig> {
    let vars: HashMap<String, String> = std::env::vars().collect();
    load_rest_api_config_from(&vars)
}

/// Same as `load_rest_api_config`, reading variables from `vars`.
///
/// Precedence, lowest first: built-in defaults, config file,
/// `SYMPTOM_CHECKER_*` variables, `PORT`.
pub fn load_rest_api_config_from(vars: &HashMap<String, String>) -> Result<RestApiConfig> {
    let config_file = vars
        .get(CONFIG_FILE_ENV)
        .cloned()
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    let settings = Config::builder()
        .set_default("host", DEFAULT_HOST)?
        .set_default("port", i64::from(DEFAULT_PORT))?
        .set_default("dataset_path", DEFAULT_DATASET_PATH)?
        .set_default("debug", false)?
        .add_source(File::with_name(&config_file).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(vars.clone())))
        .set_override_option("port", vars.get(PORT_ENV).cloned())?
        .build()
        .with_context(|| format!("Failed to read configuration (file: {})", config_file))?;

    settings
        .try_deserialize::<RestApiConfig>()
        .context("Invalid configuration value")
}
