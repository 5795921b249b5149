use std::{
    net::{IpAddr, Ipv4Addr},
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use lettre::message::Mailbox;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;
use url::Url;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

/// An email accepted by the fake API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedEmail {
    pub id: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// All emails accepted by a running fake API, in order of arrival.
#[derive(Debug, Clone, Default)]
pub struct Outbox(Arc<Mutex<Vec<ReceivedEmail>>>);

impl Outbox {
    pub fn emails(&self) -> Vec<ReceivedEmail> {
        self.0.lock().map(|x| x.clone()).unwrap_or_default()
    }

    fn push(&self, email: ReceivedEmail) {
        if let Ok(mut emails) = self.0.lock() {
            emails.push(email);
        }
    }
}

/// Handle to a fake API spawned in the background.
#[derive(Debug, Clone)]
pub struct FakeResend {
    pub url: Url,
    pub api_key: String,
    pub outbox: Outbox,
}

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    delay: Duration,
    outbox: Outbox,
}

pub fn router(api_key: &str, delay: Duration, outbox: Outbox) -> Router<()> {
    Router::new()
        .route(EMAILS_ROUTE, routing::post(send_email))
        .with_state(AppState {
            api_key: api_key.into(),
            delay,
            outbox,
        })
}

/// Spawn the fake API on an ephemeral port on localhost. Every response is
/// delayed by `delay`.
pub async fn spawn(api_key: &str, delay: Duration) -> anyhow::Result<FakeResend> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind fake resend server")?;
    let addr = listener.local_addr()?;
    let outbox = Outbox::default();

    let router = router(api_key, delay, outbox.clone());
    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok(FakeResend {
        url: format!("http://{addr}{EMAILS_ROUTE}").parse()?,
        api_key: api_key.into(),
        outbox,
    })
}

/// Run the fake API in the foreground, e.g. for local development.
pub async fn start_server(
    host: IpAddr,
    port: u16,
    api_key: &str,
    delay: Duration,
) -> anyhow::Result<()> {
    info!("Starting fake resend server on {host}:{port}");
    info!("Emails endpoint: http://{host}:{port}{EMAILS_ROUTE}");
    info!("API key: {api_key:?}, response delay: {delay:?}");

    let router = router(api_key, delay, Outbox::default());

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

#[derive(Deserialize)]
struct SendEmailRequest {
    from: String,
    to: Recipients,
    subject: String,
    html: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Recipients {
    One(String),
    Many(Vec<String>),
}

async fn send_email(state: State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    tokio::time::sleep(state.delay).await;

    let Some(api_key) = headers
        .get(AUTHORIZATION)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.strip_prefix("Bearer "))
    else {
        return error(
            StatusCode::UNAUTHORIZED,
            "missing_api_key",
            "Missing API key in the authorization header",
        );
    };

    if api_key != &*state.api_key {
        return error(StatusCode::FORBIDDEN, "invalid_api_key", "API key is invalid");
    }

    let Ok(request) = serde_json::from_slice::<SendEmailRequest>(&body) else {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Invalid request body",
        );
    };

    let to = match request.to {
        Recipients::One(to) => vec![to],
        Recipients::Many(to) => to,
    };

    if request.from.parse::<Mailbox>().is_err() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Invalid `from` field. The email address needs to follow the `email@example.com` or \
             `Name <email@example.com>` format.",
        );
    }

    if to.is_empty() || to.iter().any(|x| x.parse::<Mailbox>().is_err()) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Invalid `to` field. The email address needs to follow the `email@example.com` or \
             `Name <email@example.com>` format.",
        );
    }

    let id = Uuid::new_v4().to_string();
    info!(%id, from = %request.from, ?to, subject = %request.subject, "accepted email");
    state.outbox.push(ReceivedEmail {
        id: id.clone(),
        from: request.from,
        to,
        subject: request.subject,
        html: request.html,
    });

    Json(json!({ "id": id })).into_response()
}

fn error(status: StatusCode, name: &str, message: &str) -> Response {
    let body = json!({
        "statusCode": status.as_u16(),
        "message": message,
        "name": name,
    });
    (status, Json(body)).into_response()
}
