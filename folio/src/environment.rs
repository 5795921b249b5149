//! Wiring of the concrete service implementations.

use anyhow::Context;
use axum::http::HeaderValue;
use folio_client::endpoint::{HttpContactEndpoint, HttpContactEndpointConfig};
use folio_config::Config;
use folio_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use folio_email_impl::{ResendEmailServiceConfig, ResendEmailServiceImpl};
use folio_templates_impl::TemplateServiceImpl;
use url::Url;

pub type Email = ResendEmailServiceImpl;
pub type ContactFeature = ContactFeatureServiceImpl<Email, TemplateServiceImpl>;
pub type RestServer = folio_api_rest::RestServer<ContactFeature>;

pub fn email(config: &Config) -> anyhow::Result<Email> {
    ResendEmailServiceImpl::new(ResendEmailServiceConfig {
        api_url: config.email.api_url.clone().into(),
        timeout: *config.email.timeout,
    })
    .context("Failed to create email client")
}

pub fn contact_feature(config: &Config) -> anyhow::Result<ContactFeature> {
    Ok(ContactFeatureServiceImpl {
        email: email(config)?,
        template: TemplateServiceImpl::new()?,
        config: ContactFeatureConfig {
            api_key: config.email.api_key.clone(),
            to: config.contact.to.clone(),
            from: config.contact.from.clone(),
        },
    })
}

pub fn rest_server(config: &Config) -> anyhow::Result<RestServer> {
    let allowed_origins = config
        .http
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid origin {origin:?}"))
        })
        .collect::<anyhow::Result<_>>()?;

    Ok(RestServer::new(
        contact_feature(config)?,
        folio_api_rest::RestServerConfig { allowed_origins },
    ))
}

pub fn contact_endpoint(
    config: &Config,
    endpoint_override: Option<Url>,
) -> anyhow::Result<HttpContactEndpoint> {
    HttpContactEndpoint::new(HttpContactEndpointConfig {
        origin: config.client.origin.clone(),
        endpoint_override: endpoint_override.or_else(|| config.client.endpoint.clone()),
        timeout: Some(*config.client.timeout),
    })
}
