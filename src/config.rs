// pdf-convert/src/config.rs

use crate::models::ConversionOptions;
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub engine: EngineConfig,
    pub output: OutputConfig,
    /// Conversion options used when a request does not bring its own.
    #[serde(default)]
    pub options: ConversionOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub executable: String,
    pub temp_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub directory: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Loads defaults, then the optional file `name` (any supported
    /// extension), then `PDFCONV__*` environment variables.
    pub fn load_from(name: &str) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default values
            .set_default("service.name", "pdf-convert")?
            .set_default("service.log_level", "info")?
            .set_default("engine.executable", "wkhtmltopdf")?
            .set_default("output.directory", "./output")?
            // Load from config file if it exists
            .add_source(File::with_name(name).required(false))
            // Override with environment variables (e.g., PDFCONV__ENGINE__EXECUTABLE)
            .add_source(Environment::with_prefix("PDFCONV").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Options for one request: the JSON document `request` layered over the
    /// configured options. Objects merge key by key, anything else replaces
    /// the configured value (`null` clears it).
    pub fn request_options(&self, request: &[u8]) -> Result<ConversionOptions, serde_json::Error> {
        let mut options = serde_json::to_value(&self.options)?;
        let overrides: Value = serde_json::from_slice(request)?;
        merge(&mut options, overrides);
        serde_json::from_value(options)
    }
}

fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}
