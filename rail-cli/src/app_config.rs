use rail_booking::TravelWindow;
use rail_catalog::FareConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub route: RouteConfig,
    pub inventory: InventoryConfig,
    pub travel_window: TravelWindow,
    pub fares: FareConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RouteConfig {
    pub name: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            name: "KOCHI <-> BANGALORE".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InventoryConfig {
    pub initial_capacity: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { initial_capacity: 1000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// Used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "rail_cli=info,rail_booking=info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Built-in defaults cover every key, so all files are optional
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `RAIL__INVENTORY__INITIAL_CAPACITY=50`
            .add_source(
                config::Environment::with_prefix("RAIL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
