use std::{net::Ipv4Addr, time::Duration};

use folio::environment;
use folio_api_rest::CONTACT_ROUTE;
use folio_client::{
    form::{ContactForm, FormStatus},
    ContactSubmitter, SENT,
};
use folio_config::{ClientConfig, Config, ContactConfig, EmailConfig, HttpConfig};
use folio_testing::resend::{self, FakeResend};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use url::Url;

#[tokio::test]
async fn message_is_delivered() {
    let fake = resend::spawn("re_test_key", Duration::ZERO).await.unwrap();
    let config = make_config(&fake, Some("re_test_key"));
    let form = setup(config).await;

    let result = form.submit().await.unwrap();

    assert!(result.ok);
    assert_eq!(result.message, SENT);
    let emails = fake.outbox.emails();
    assert_eq!(emails.len(), 1);
    assert_eq!(result.id.as_deref(), Some(emails[0].id.as_str()));
    assert_eq!(emails[0].to, ["me@example.com"]);
    assert_eq!(emails[0].from, "Portfolio <noreply@example.com>");
    assert_eq!(emails[0].subject, "New portfolio message from Jo <Admin>");
    assert!(emails[0].html.contains("Jo &lt;Admin&gt;"));
    assert!(emails[0].html.contains("jo@example.com"));
    assert!(emails[0].html.contains("first line"));
    assert!(emails[0].html.contains("second line"));
    assert_eq!(form.status(), FormStatus::Sent { id: result.id });
    assert_eq!(form.fields(), Default::default());
}

#[tokio::test]
async fn provider_rejects_api_key() {
    let fake = resend::spawn("re_test_key", Duration::ZERO).await.unwrap();
    let config = make_config(&fake, Some("re_wrong"));
    let form = setup(config).await;

    let result = form.submit().await.unwrap();

    assert!(!result.ok);
    assert!(result.message.starts_with("email provider error: "));
    assert!(result.message.contains("invalid_api_key"));
    assert!(fake.outbox.emails().is_empty());
    assert_eq!(form.fields().name, "Jo <Admin>");
}

#[tokio::test]
async fn missing_api_key() {
    let fake = resend::spawn("re_test_key", Duration::ZERO).await.unwrap();
    let config = make_config(&fake, None);
    let form = setup(config).await;

    let result = form.submit().await.unwrap();

    assert!(!result.ok);
    assert_eq!(result.message, "missing configuration value RESEND_API_KEY");
    assert!(fake.outbox.emails().is_empty());
}

#[tokio::test]
async fn validation_failed() {
    let fake = resend::spawn("re_test_key", Duration::ZERO).await.unwrap();
    let config = make_config(&fake, Some("re_test_key"));
    let form = setup(config).await;
    form.update_fields(|fields| fields.email = "not an email".into());

    let result = form.submit().await.unwrap();

    assert!(!result.ok);
    assert_eq!(result.message, "validation failed");
    let errors = result.field_errors.unwrap();
    assert_eq!(errors.keys().collect::<Vec<_>>(), ["email"]);
    assert!(fake.outbox.emails().is_empty());
}

async fn setup(mut config: Config) -> ContactForm<folio_client::endpoint::HttpContactEndpoint> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.client.origin = format!("http://{addr}").parse().unwrap();

    let server = environment::rest_server(&config).unwrap();
    tokio::spawn(server.serve_with_listener(listener));

    let endpoint = environment::contact_endpoint(&config, None).unwrap();
    assert_eq!(endpoint.url().path(), CONTACT_ROUTE);

    let form = ContactForm::new(ContactSubmitter::new(endpoint));
    form.update_fields(|fields| {
        fields.name = "Jo <Admin>".into();
        fields.email = "jo@example.com".into();
        fields.message = "first line\nsecond line".into();
    });
    form
}

fn make_config(fake: &FakeResend, api_key: Option<&str>) -> Config {
    Config {
        http: HttpConfig {
            host: Ipv4Addr::LOCALHOST.into(),
            port: 0,
            allowed_origins: Vec::new(),
        },
        email: EmailConfig {
            api_url: fake.url.clone(),
            timeout: Duration::from_secs(5).into(),
            api_key: api_key.map(|x| x.to_owned().into()),
        },
        contact: ContactConfig {
            to: Some("me@example.com".into()),
            from: Some("Portfolio <noreply@example.com>".into()),
        },
        client: ClientConfig {
            origin: Url::parse("http://127.0.0.1").unwrap(),
            endpoint: None,
            timeout: Duration::from_secs(5).into(),
        },
    }
}
