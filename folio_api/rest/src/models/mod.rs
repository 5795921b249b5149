use folio_models::contact::ContactFieldErrors;
use serde::Serialize;

pub mod contact;

/// Body of every failed request.
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    ok: bool,
    msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ContactFieldErrors>,
}

impl ApiFailure {
    pub fn new(msg: String, errors: Option<ContactFieldErrors>) -> Self {
        Self {
            ok: false,
            msg,
            errors,
        }
    }
}
