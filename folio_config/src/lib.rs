use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use folio_models::Sensitive;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable with a colon separated list of config files.
pub const CONFIG_PATHS_ENV: &str = "FOLIO_CONFIG";

/// Deployment secrets and overrides which are read from the environment
/// instead of the config files.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("RESEND_API_KEY", "email.api_key"),
    ("CONTACT_TO", "contact.to"),
    ("CONTACT_FROM", "contact.from"),
    ("CONTACT_ENDPOINT", "client.endpoint"),
];

/// Load the config files listed in `FOLIO_CONFIG` (or the default config)
/// and apply the environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths: Vec<PathBuf> = match std::env::var(CONFIG_PATHS_ENV) {
        Ok(value) => value.split(':').map(Into::into).collect(),
        Err(_) => vec![DEFAULT_CONFIG_PATH.into()],
    };

    load_from(&paths, |key| std::env::var(key).ok())
}

fn load_from(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            let value = env(var).filter(|value| !value.is_empty());
            builder.set_override_option(key, value)
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Origins allowed to call the API from a browser. Empty disables CORS.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub api_url: Url,
    pub timeout: Duration,
    pub api_key: Option<Sensitive<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    pub to: Option<String>,
    pub from: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub origin: Url,
    pub endpoint: Option<Url>,
    pub timeout: Duration,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_from(&[Path::new(DEFAULT_CONFIG_PATH)], |_| None).unwrap();

        assert_eq!(config.http.port, 8000);
        assert!(config.email.api_key.is_none());
        assert!(config.contact.to.is_none());
        assert!(config.contact.from.is_none());
        assert!(config.client.endpoint.is_none());
        assert_eq!(*config.email.timeout, std::time::Duration::from_secs(10));
    }

    #[test]
    fn env_overrides() {
        let env = HashMap::from([
            ("RESEND_API_KEY", "re_test"),
            ("CONTACT_TO", "me@example.com"),
            ("CONTACT_FROM", "Portfolio <noreply@example.com>"),
            ("CONTACT_ENDPOINT", "https://example.com/contact"),
        ]);

        let config = load_from(&[Path::new(DEFAULT_CONFIG_PATH)], |key| {
            env.get(key).map(|&x| x.to_owned())
        })
        .unwrap();

        assert_eq!(config.email.api_key.as_deref().map(String::as_str), Some("re_test"));
        assert_eq!(config.contact.to.as_deref(), Some("me@example.com"));
        assert_eq!(
            config.contact.from.as_deref(),
            Some("Portfolio <noreply@example.com>")
        );
        assert_eq!(
            config.client.endpoint.unwrap().as_str(),
            "https://example.com/contact"
        );
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = load_from(&[Path::new(DEFAULT_CONFIG_PATH)], |_| Some(String::new())).unwrap();

        assert!(config.email.api_key.is_none());
        assert!(config.contact.to.is_none());
    }

    #[test]
    fn missing_file() {
        let result = load_from(&[Path::new("/does/not/exist.toml")], |_| None);

        assert!(result.is_err());
    }
}
