use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template to HTML.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T>(mut self, template: T, result: anyhow::Result<String>) -> Self
    where
        T: Template + Send + PartialEq + std::fmt::Debug + 'static,
    {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| result);
        self
    }
}

/// A template which is embedded into the binary.
///
/// Names ending in `.html` are rendered with autoescaping.
pub trait Template: Serialize {
    const NAME: &'static str;
    const SOURCE: &'static str;
}

/// Layout which the other templates extend.
pub const LAYOUT: (&str, &str) = ("base.html", include_str!("../templates/base.html"));

/// Every template, in the order in which it has to be registered.
pub const TEMPLATES: &[(&str, &str)] = &[
    LAYOUT,
    (
        ContactNotificationTemplate::NAME,
        ContactNotificationTemplate::SOURCE,
    ),
];

/// Notification sent to the site owner for every contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactNotificationTemplate {
    pub name: String,
    pub email: String,
    /// The message split into lines, each rendered as its own paragraph.
    pub lines: Vec<String>,
}

impl Template for ContactNotificationTemplate {
    const NAME: &'static str = "contact_notification.html";
    const SOURCE: &'static str = include_str!("../templates/contact_notification.html");
}

impl ContactNotificationTemplate {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: &str) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            lines: message.split('\n').map(Into::into).collect(),
        }
    }
}
