use std::{collections::BTreeMap, future::Future, time::Duration};

use anyhow::Context;
use folio_utils::Apply;
use reqwest::ClientBuilder;
use serde::{Deserialize, Serialize};
use url::Url;

/// Same-origin path of the contact endpoint.
pub const DEFAULT_ENDPOINT_PATH: &str = "/api/contact";

#[cfg_attr(test, mockall::automock)]
pub trait ContactEndpoint: Send + Sync + 'static {
    /// Issue a single request to the contact endpoint. Fails only if the
    /// endpoint could not be reached.
    fn post(
        &self,
        payload: &ContactPayload,
    ) -> impl Future<Output = anyhow::Result<EndpointResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResponse {
    /// Whether the response had a 2xx status code.
    pub success: bool,
    /// The parsed body, `None` if it was not a valid response document.
    pub body: Option<ApiResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub ok: bool,
    pub msg: Option<String>,
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    pub id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpContactEndpoint {
    url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Clone)]
pub struct HttpContactEndpointConfig {
    /// Origin the default endpoint path is resolved against.
    pub origin: Url,
    pub endpoint_override: Option<Url>,
    pub timeout: Option<Duration>,
}

impl HttpContactEndpoint {
    pub fn new(config: HttpContactEndpointConfig) -> anyhow::Result<Self> {
        let url = match config.endpoint_override {
            Some(url) => url,
            None => config
                .origin
                .join(DEFAULT_ENDPOINT_PATH)
                .context("Failed to resolve contact endpoint")?,
        };

        let client = reqwest::Client::builder()
            .apply_map(config.timeout, ClientBuilder::timeout)
            .build()
            .context("Failed to build http client")?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ContactEndpoint for HttpContactEndpoint {
    async fn post(&self, payload: &ContactPayload) -> anyhow::Result<EndpointResponse> {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await?;

        let success = response.status().is_success();
        let body = response.json::<ApiResponse>().await.ok();

        Ok(EndpointResponse { success, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint() {
        let sut = HttpContactEndpoint::new(HttpContactEndpointConfig {
            origin: "https://portfolio.example/about/".parse().unwrap(),
            endpoint_override: None,
            timeout: None,
        })
        .unwrap();

        assert_eq!(sut.url().as_str(), "https://portfolio.example/api/contact");
    }

    #[test]
    fn endpoint_override() {
        let sut = HttpContactEndpoint::new(HttpContactEndpointConfig {
            origin: "https://portfolio.example".parse().unwrap(),
            endpoint_override: Some("https://api.example/contact".parse().unwrap()),
            timeout: Some(Duration::from_secs(1)),
        })
        .unwrap();

        assert_eq!(sut.url().as_str(), "https://api.example/contact");
    }
}
