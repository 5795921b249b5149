use std::collections::BTreeMap;

use nutype::nutype;
use serde::Serialize;

use crate::email_address::EmailAddress;

/// A validated contact form submission.
///
/// Only lives for the duration of a single request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub message: ContactMessageContent,
}

#[nutype(
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(len_char_min = 10),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

pub const FIELD_REQUIRED: &str = "required";
pub const NAME_TOO_SHORT: &str = "name must be at least 2 characters";
pub const EMAIL_INVALID: &str = "invalid email address";
pub const MESSAGE_TOO_SHORT: &str = "message must be at least 10 characters";

/// Violated rules per form field. Fields that passed validation are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactFieldErrors(BTreeMap<&'static str, Vec<&'static str>>);

impl ContactFieldErrors {
    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_default().push(message);
    }

    pub fn get(&self, field: &str) -> Option<&[&'static str]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ContactSubmission {
    /// Validate raw form values. A `None` value means the field was missing
    /// or not a string.
    pub fn validate(
        name: Option<&str>,
        email: Option<&str>,
        message: Option<&str>,
    ) -> Result<Self, ContactFieldErrors> {
        let mut errors = ContactFieldErrors::default();

        let name = match name {
            Some(name) => ContactName::try_new(name)
                .map_err(|_| errors.add("name", NAME_TOO_SHORT))
                .ok(),
            None => {
                errors.add("name", FIELD_REQUIRED);
                None
            }
        };

        let email = match email {
            Some(email) => email
                .parse::<EmailAddress>()
                .map_err(|_| errors.add("email", EMAIL_INVALID))
                .ok(),
            None => {
                errors.add("email", FIELD_REQUIRED);
                None
            }
        };

        let message = match message {
            Some(message) => ContactMessageContent::try_new(message)
                .map_err(|_| errors.add("message", MESSAGE_TOO_SHORT))
                .ok(),
            None => {
                errors.add("message", FIELD_REQUIRED);
                None
            }
        };

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(Self {
                name,
                email,
                message,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn valid() {
        // Act
        let result = ContactSubmission::validate(
            Some("Jo"),
            Some("jo@example.com"),
            Some("Hello there, this is long enough."),
        );

        // Assert
        let submission = result.unwrap();
        assert_eq!(*submission.name, "Jo");
        assert_eq!(submission.email.as_str(), "jo@example.com");
        assert_eq!(*submission.message, "Hello there, this is long enough.");
    }

    #[test]
    fn all_fields_invalid() {
        // Act
        let result = ContactSubmission::validate(Some("J"), Some("bad"), Some("short"));

        // Assert
        let errors = result.unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            ["email", "message", "name"]
        );
        assert_eq!(errors.get("name"), Some(&[NAME_TOO_SHORT][..]));
        assert_eq!(errors.get("email"), Some(&[EMAIL_INVALID][..]));
        assert_eq!(errors.get("message"), Some(&[MESSAGE_TOO_SHORT][..]));
    }

    #[test]
    fn only_failing_fields_are_reported() {
        for (name, email, message, expected) in [
            ("J", "jo@example.com", "long enough message", vec!["name"]),
            ("Jo", "jo(at)example.com", "long enough message", vec!["email"]),
            ("Jo", "jo@example.com", "too short", vec!["message"]),
        ] {
            let errors =
                ContactSubmission::validate(Some(name), Some(email), Some(message)).unwrap_err();
            assert_eq!(errors.fields().collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn missing_fields_are_required() {
        // Act
        let result = ContactSubmission::validate(None, None, Some("Hello there, long enough."));

        // Assert
        let errors = result.unwrap_err();
        assert_eq!(errors.get("name"), Some(&[FIELD_REQUIRED][..]));
        assert_eq!(errors.get("email"), Some(&[FIELD_REQUIRED][..]));
        assert_eq!(errors.get("message"), None);
    }

    #[test]
    fn lengths_count_characters() {
        assert_matches!(
            ContactSubmission::validate(Some("Jö"), Some("jo@example.com"), Some("ññññññññññ")),
            Ok(_)
        );
    }

    #[test]
    fn serialize_field_errors() {
        // Arrange
        let mut errors = ContactFieldErrors::default();
        errors.add("name", NAME_TOO_SHORT);
        errors.add("email", EMAIL_INVALID);

        // Act
        let result = serde_json::to_value(&errors).unwrap();

        // Assert
        assert_eq!(
            result,
            serde_json::json!({
                "name": [NAME_TOO_SHORT],
                "email": [EMAIL_INVALID],
            })
        );
    }
}
