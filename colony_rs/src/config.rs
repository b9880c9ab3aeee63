//! Configuration utilities for the colony simulation.

use log::LevelFilter;
use semver::Version;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "application must be compiled by Cargo");
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "application must be compiled by Cargo");

/// Name of the ECS core linked into the application.
pub const ENGINE_NAME: &str = colony_ecs::NAME;

lazy_static::lazy_static! {
    /// Semver version of the ECS core linked into the application.
    pub static ref ENGINE_VERSION: Version =
        colony_ecs::VERSION.parse().unwrap_or_else(|_| Version::new(0, 0, 0));
}

/// This struct represents general configuration of the simulation.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    frame_limit: u64,
    log_level: LevelFilter,
    texture_swap_x: i32,
}

impl Config {
    /// Creates new configuration with given name and version of your application.
    pub const fn new(name: String, version: Version) -> Self {
        Self {
            name,
            version,
            frame_limit: 240,
            log_level: LevelFilter::Debug,
            texture_swap_x: 100,
        }
    }

    /// Sets count of frames to simulate before exit.
    pub fn with_frame_limit(mut self, frame_limit: u64) -> Self {
        self.frame_limit = frame_limit;
        self
    }

    /// Sets maximum level of log messages.
    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    /// Sets horizontal position after which the player texture is swapped.
    pub fn with_texture_swap_x(mut self, texture_swap_x: i32) -> Self {
        self.texture_swap_x = texture_swap_x;
        self
    }

    /// Name of your application.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of your application.
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn frame_limit(&self) -> u64 {
        self.frame_limit
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn texture_swap_x(&self) -> i32 {
        self.texture_swap_x
    }
}

impl Default for Config {
    fn default() -> Self {
        let version = APP_VERSION_STR
            .parse()
            .unwrap_or_else(|_| Version::new(0, 0, 0));
        let log_level = if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self::new(APP_NAME.to_string(), version).with_log_level(log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.name(), "colony_rs");
        assert_eq!(config.version(), &Version::new(0, 1, 0));
        assert_eq!(config.frame_limit(), 240);
        assert_eq!(config.texture_swap_x(), 100);
        assert_eq!(*ENGINE_VERSION, Version::new(0, 1, 0));
        assert_eq!(ENGINE_NAME, "colony_ecs");
    }

    #[test]
    fn test_builder() {
        let config = Config::new("ants".to_string(), Version::new(1, 2, 3))
            .with_frame_limit(10)
            .with_log_level(LevelFilter::Warn)
            .with_texture_swap_x(-1);

        assert_eq!(config.name(), "ants");
        assert_eq!(config.version(), &Version::new(1, 2, 3));
        assert_eq!(config.frame_limit(), 10);
        assert_eq!(config.log_level(), LevelFilter::Warn);
        assert_eq!(config.texture_swap_x(), -1);
    }
}
