use std::sync::Arc;

use anyhow::Context;
use folio_templates_contracts::{Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .context("Failed to load email templates")?;

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.tera
            .render(T::NAME, &context)
            .with_context(|| format!("Failed to render template {}", T::NAME))
    }
}

#[cfg(test)]
mod tests {
    use folio_templates_contracts::ContactNotificationTemplate;

    use super::*;

    #[test]
    fn contact_notification() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();
        let template = ContactNotificationTemplate::new(
            "Max Mustermann",
            "max.mustermann@example.de",
            "Hello World!\nSecond line",
        );

        // Act
        let result = sut.render(&template).unwrap();

        // Assert
        assert!(result.contains("<strong>Name:</strong> Max Mustermann"));
        assert!(result.contains("<strong>Email:</strong> max.mustermann@example.de"));
        assert!(result.contains("<p style=\"margin: 0 0 8px\">Hello World!</p>"));
        assert!(result.contains("<p style=\"margin: 0 0 8px\">Second line</p>"));
    }

    #[test]
    fn contact_notification_escapes_input() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();
        let template = ContactNotificationTemplate::new(
            "<b>Jo</b>",
            "jo@example.com",
            "<script>alert(1)</script>\n{{ name }}",
        );

        // Act
        let result = sut.render(&template).unwrap();

        // Assert
        assert!(!result.contains("<script>"));
        assert!(!result.contains("<b>Jo</b>"));
        assert!(result.contains("&lt;script&gt;"));
        assert!(result.contains("{{ name }}"));
    }
}
