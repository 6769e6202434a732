//! Runtime configuration from the environment (and `.env`).
//!
//! - `PARCEL_LAYER_URL`: base URL of the parcel feature layer
//! - `ARCGIS_TIMEOUT_SECS`: HTTP timeout in seconds (default 30)

use std::time::Duration;

use crate::domain::{LayerRegistry, PARCEL_LAYER};
use crate::error::AppError;

pub const ENV_PARCEL_LAYER_URL: &str = "PARCEL_LAYER_URL";
pub const ENV_TIMEOUT_SECS: &str = "ARCGIS_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub parcel_layer_url: Option<String>,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            parcel_layer_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Reads the process environment; the caller loads `.env` beforehand.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let parcel_layer_url = lookup(ENV_PARCEL_LAYER_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => Duration::from_secs(parse_timeout_secs(&raw)?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            parcel_layer_url,
            timeout,
        })
    }

    /// Apply command-line values on top of the environment.
    pub fn with_overrides(mut self, layer_url: Option<String>, timeout_secs: Option<u64>) -> Result<Self, AppError> {
        if let Some(url) = layer_url.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.parcel_layer_url = Some(url);
        }
        match timeout_secs {
            Some(0) => {
                return Err(AppError::new(2, "Invalid --timeout-secs 0: expected a positive number of seconds."));
            }
            Some(secs) => self.timeout = Duration::from_secs(secs),
            None => {}
        }
        Ok(self)
    }

    /// Layer registry seeded from these settings.
    pub fn layers(&self) -> LayerRegistry {
        let mut layers = LayerRegistry::new();
        if let Some(url) = &self.parcel_layer_url {
            layers.set_layer(PARCEL_LAYER, url.clone());
        }
        layers
    }
}

pub fn parse_timeout_secs(raw: &str) -> Result<u64, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(AppError::new(
            2,
            format!("Invalid {ENV_TIMEOUT_SECS} '{raw}': expected a positive number of seconds."),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.layers().get(PARCEL_LAYER), None);
    }

    #[test]
    fn reads_layer_and_timeout() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_PARCEL_LAYER_URL, " https://gis.example/MapServer/0 "),
            (ENV_TIMEOUT_SECS, "12"),
        ]))
        .unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(12));
        assert_eq!(
            settings.layers().get(PARCEL_LAYER),
            Some("https://gis.example/MapServer/0")
        );
    }

    #[test]
    fn blank_layer_url_is_unset() {
        let settings = Settings::from_lookup(lookup(&[(ENV_PARCEL_LAYER_URL, "  ")])).unwrap();
        assert_eq!(settings.parcel_layer_url, None);
    }

    #[test]
    fn overrides_win_over_environment() {
        let settings = Settings::from_lookup(lookup(&[(ENV_PARCEL_LAYER_URL, "https://env.example/0")]))
            .unwrap()
            .with_overrides(Some("https://cli.example/0".to_string()), Some(5))
            .unwrap();
        assert_eq!(settings.parcel_layer_url.as_deref(), Some("https://cli.example/0"));
        assert_eq!(settings.timeout, Duration::from_secs(5));

        assert!(Settings::default().with_overrides(None, Some(0)).is_err());
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = Settings::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(parse_timeout_secs("0").is_err());
    }
}
