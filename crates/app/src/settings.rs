//! Runtime settings, merged from (lowest to highest priority) built-in
//! defaults, an optional TOML file, `HASIBA_*` environment variables and
//! command-line flags.
use engine::Currency;
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/hasiba.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `tracing` level for the workspace crates (`error` .. `trace`).
    pub log_level: String,
    /// Rate provider endpoint; the currency code is appended as last segment.
    pub rates_url: String,
    pub rates_timeout_secs: u64,
    pub from_currency: Currency,
    pub to_currency: Currency,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            rates_url: "https://api.exchangerate-api.com/v4/latest".to_string(),
            rates_timeout_secs: 10,
            from_currency: Currency::Omr,
            to_currency: Currency::Aed,
        }
    }
}

/// Values given on the command line; `None` keeps the lower layers.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<String>,
    pub log_level: Option<String>,
    pub rates_url: Option<String>,
}

pub fn load(overrides: &Overrides) -> Result<Settings> {
    let config_path = overrides.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("HASIBA"))
        .build()?
        .try_deserialize()?;

    Ok(apply(settings, overrides))
}

fn apply(mut settings: Settings, overrides: &Overrides) -> Settings {
    if let Some(level) = &overrides.log_level {
        settings.log_level = level.clone();
    }
    if let Some(url) = &overrides.rates_url {
        settings.rates_url = url.clone();
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                "log_level = \"debug\"\nfrom_currency = \"USD\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.from_currency, Currency::Usd);
        assert_eq!(settings.to_currency, Currency::Aed);
        assert_eq!(settings.rates_timeout_secs, 10);
    }

    #[test]
    fn unknown_currency_in_file_is_rejected() {
        let result = config::Config::builder()
            .add_source(config::File::from_str(
                "to_currency = \"XYZ\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<Settings>();
        assert!(result.is_err());
    }

    #[test]
    fn cli_overrides_win() {
        let overrides = Overrides {
            config: None,
            log_level: Some("warn".to_string()),
            rates_url: Some("http://127.0.0.1:9000/latest".to_string()),
        };
        let settings = apply(Settings::default(), &overrides);
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.rates_url, "http://127.0.0.1:9000/latest");
        assert_eq!(settings.from_currency, Currency::Omr);
    }
}
