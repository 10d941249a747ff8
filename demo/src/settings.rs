use std::path::Path;

use anyhow::{ensure, Context};
use serde::Deserialize;
use zindex::IndexConfig;

use crate::kitti::DIMENSION;

/// Demo configuration, read from an optional TOML file:
///
/// ```toml
/// [index]
/// bits_per_dim = 16
/// delta = 500000
///
/// [driver]
/// radius = 1000.0
/// query_every = 5
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub index: IndexConfig,
    pub driver: DriverConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Query on every frame number divisible by this.
    pub query_every: u32,
    /// Log progress on every frame number divisible by this.
    pub log_every: u32,
    pub radius: f64,
    /// Multiplier from label units (meters, radians) to coordinates.
    pub scale: f32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            query_every: 5,
            log_every: 10,
            radius: 1000.0,
            scale: 1000.0,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("invalid settings in {}", path.display()))?
            }
            None => Settings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.index.validate::<DIMENSION>()?;
        ensure!(self.driver.query_every > 0, "query_every must be positive");
        ensure!(self.driver.log_every > 0, "log_every must be positive");
        ensure!(self.driver.radius >= 0.0, "radius must be non-negative");
        ensure!(self.driver.scale > 0.0, "scale must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.index.delta, 500_000);
        assert_eq!(settings.driver.query_every, 5);
    }

    #[test]
    fn partial_file() {
        let settings: Settings = toml::from_str("[index]\ndelta = 42\n[driver]\nradius = 2.5").unwrap();
        assert_eq!(settings.index.delta, 42);
        assert_eq!(settings.index.bits_per_dim, 16);
        assert_eq!(settings.driver.radius, 2.5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_wide_keys() {
        let settings: Settings = toml::from_str("[index]\nbits_per_dim = 32").unwrap();
        assert!(settings.validate().is_err());
    }
}
