use crate::seed::default_routes;
use config::ConfigError;
use railseat_core::RouteSeed;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub inventory: InventoryConfig,
    pub events: EventsConfig,
    pub routes: Vec<RouteSeed>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            inventory: InventoryConfig::default(),
            events: EventsConfig::default(),
            routes: default_routes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 50051,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InventoryConfig {
    pub seats_per_section: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { seats_per_section: 20 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EventsConfig {
    /// Events buffered per subscriber before slow readers start lagging.
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { channel_capacity: 100 }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides.
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in.
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a single TOML document; keys it omits keep their defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inventory.seats_per_section == 0 {
            return Err(ConfigError::Message(
                "inventory.seats_per_section must be at least 1".to_string(),
            ));
        }
        if self.events.channel_capacity == 0 {
            return Err(ConfigError::Message(
                "events.channel_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Eg. `RAILSEAT_SERVER__PORT=8080` sets `server.port`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("RAILSEAT")
        .prefix_separator("_")
        .separator("__")
}
