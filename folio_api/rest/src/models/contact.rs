use folio_models::contact::{ContactFieldErrors, ContactSubmission};
use serde::Serialize;
use serde_json::Value;

/// Validate a submission body. Fields that are missing or not strings are
/// reported as required, so every invalid field shows up in one response.
pub fn parse_submission(body: &Value) -> Result<ContactSubmission, ContactFieldErrors> {
    let field = |name: &str| body.get(name).and_then(Value::as_str);
    ContactSubmission::validate(field("name"), field("email"), field("message"))
}

#[derive(Debug, Serialize)]
pub struct ApiContactSent {
    pub ok: bool,
    /// Identifier assigned to the email by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
