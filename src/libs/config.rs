//! Configuration management for the mapty application.
//!
//! Settings are stored as pretty-printed JSON in the platform data
//! directory (see [`DataStorage`]). Every module is optional: a missing file
//! or a missing section means built-in defaults.
//!
//! ## Modules
//!
//! - **Map**: zoom level used when centering and the tile URL template
//!   written into map exports
//! - **Geolocation**: where the current position comes from (an HTTP IP
//!   lookup or a fixed home coordinate) and the request timeout
//!
//! ```rust,no_run
//! use mapty::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("zoom: {}", config.map_config().zoom_level);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::map::{DEFAULT_TILE_URL, DEFAULT_ZOOM_LEVEL};
use super::workout::Coords;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

/// Entry in the module selection list of the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MapConfig {
    /// Zoom level applied when the map centers on a position or a workout
    pub zoom_level: u8,
    /// Tile URL template (`{z}/{x}/{y}`) written into map exports
    pub tile_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            zoom_level: DEFAULT_ZOOM_LEVEL,
            tile_url: DEFAULT_TILE_URL.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeolocationProvider {
    /// Ask an IP geolocation service over HTTP
    #[default]
    Ip,
    /// Always use the configured home position
    Fixed,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GeolocationConfig {
    pub provider: GeolocationProvider,
    /// Endpoint returning `{"lat": .., "lon": ..}`
    pub service_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Used by the fixed provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<Coords>,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        GeolocationConfig {
            provider: GeolocationProvider::Ip,
            service_url: DEFAULT_GEOLOCATION_URL.to_string(),
            timeout: 5,
            home: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<GeolocationConfig>,
}

impl Config {
    /// Loads the configuration file, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    pub fn map_config(&self) -> MapConfig {
        self.map.clone().unwrap_or_default()
    }

    pub fn geolocation_config(&self) -> GeolocationConfig {
        self.geolocation.clone().unwrap_or_default()
    }

    /// Interactive setup wizard, seeded with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "map".to_string(),
                name: Message::ConfigModuleMap.to_string(),
            },
            ConfigModule {
                key: "geolocation".to_string(),
                name: Message::ConfigModuleGeolocation.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "map" => {
                    let default = config.map_config();
                    msg_print!(Message::ConfigModuleMap);
                    config.map = Some(MapConfig {
                        zoom_level: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptZoomLevel.to_string())
                            .default(default.zoom_level)
                            .interact_text()?,
                        tile_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTileUrl.to_string())
                            .default(default.tile_url)
                            .interact_text()?,
                    });
                }
                "geolocation" => {
                    let default = config.geolocation_config();
                    msg_print!(Message::ConfigModuleGeolocation);

                    let providers = ["IP lookup", "Fixed home position"];
                    let provider = match Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptGeolocationProvider.to_string())
                        .items(&providers)
                        .default(if default.provider == GeolocationProvider::Fixed { 1 } else { 0 })
                        .interact()?
                    {
                        1 => GeolocationProvider::Fixed,
                        _ => GeolocationProvider::Ip,
                    };

                    let (service_url, timeout) = match provider {
                        GeolocationProvider::Ip => (
                            Input::with_theme(&ColorfulTheme::default())
                                .with_prompt(Message::PromptGeolocationUrl.to_string())
                                .default(default.service_url.clone())
                                .interact_text()?,
                            Input::with_theme(&ColorfulTheme::default())
                                .with_prompt(Message::PromptGeolocationTimeout.to_string())
                                .default(default.timeout)
                                .interact_text()?,
                        ),
                        GeolocationProvider::Fixed => (default.service_url.clone(), default.timeout),
                    };

                    let home = match provider {
                        GeolocationProvider::Fixed => {
                            let current = default.home.unwrap_or(Coords::new(0.0, 0.0));
                            Some(Coords::new(
                                Input::with_theme(&ColorfulTheme::default())
                                    .with_prompt(Message::PromptHomeLatitude.to_string())
                                    .default(current.lat())
                                    .interact_text()?,
                                Input::with_theme(&ColorfulTheme::default())
                                    .with_prompt(Message::PromptHomeLongitude.to_string())
                                    .default(current.lng())
                                    .interact_text()?,
                            ))
                        }
                        GeolocationProvider::Ip => default.home,
                    };

                    config.geolocation = Some(GeolocationConfig {
                        provider,
                        service_url,
                        timeout,
                        home,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
