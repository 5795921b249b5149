use folio_config::Config;
use tracing::{info, warn};

use crate::environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    for name in missing_secrets(&config) {
        warn!("{name} is not set, contact messages will be rejected");
    }

    let server = environment::rest_server(&config)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}

/// Secrets that are unset or empty, in the order the contact service checks them.
fn missing_secrets(config: &Config) -> Vec<&'static str> {
    [
        ("RESEND_API_KEY", config.email.api_key.as_deref().map(String::as_str)),
        ("CONTACT_TO", config.contact.to.as_deref()),
        ("CONTACT_FROM", config.contact.from.as_deref()),
    ]
    .into_iter()
    .filter(|(_, value)| value.filter(|x| !x.is_empty()).is_none())
    .map(|(name, _)| name)
    .collect()
}

#[cfg(test)]
mod tests {
    use folio_config::{ClientConfig, ContactConfig, EmailConfig, HttpConfig};

    use super::*;

    #[test]
    fn empty_secrets_are_missing() {
        // Arrange
        let config = make_config(Some(""), Some("me@example.com"), None);

        // Act
        let missing = missing_secrets(&config);

        // Assert
        assert_eq!(missing, ["RESEND_API_KEY", "CONTACT_FROM"]);
    }

    #[test]
    fn all_secrets_set() {
        let config = make_config(
            Some("re_test"),
            Some("me@example.com"),
            Some("Portfolio <noreply@example.com>"),
        );

        assert!(missing_secrets(&config).is_empty());
    }

    fn make_config(api_key: Option<&str>, to: Option<&str>, from: Option<&str>) -> Config {
        Config {
            http: HttpConfig {
                host: [127, 0, 0, 1].into(),
                port: 8000,
                allowed_origins: Vec::new(),
            },
            email: EmailConfig {
                api_url: "https://api.resend.com/emails".parse().unwrap(),
                timeout: std::time::Duration::from_secs(10).into(),
                api_key: api_key.map(|x| x.to_owned().into()),
            },
            contact: ContactConfig {
                to: to.map(Into::into),
                from: from.map(Into::into),
            },
            client: ClientConfig {
                origin: "http://127.0.0.1:8000".parse().unwrap(),
                endpoint: None,
                timeout: std::time::Duration::from_secs(15).into(),
            },
        }
    }
}
