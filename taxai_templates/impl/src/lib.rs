use std::sync::Arc;

use taxai_di::Build;
use taxai_templates_contracts::{Template, TemplateService, TEMPLATES};
use taxai_utils::trace_instrument;
use tera::Tera;

#[derive(Debug, Clone, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template)
                .unwrap_or_else(|err| panic!("Failed to compile template {name}: {err}"));
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    #[trace_instrument(skip(self, template), fields(template = T::NAME))]
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use taxai_templates_contracts::ContactEmailTemplate;

    use super::*;

    fn contact_email() -> ContactEmailTemplate {
        ContactEmailTemplate {
            name: "Kim".into(),
            company: "Acme".into(),
            email: "kim@x.com".into(),
            inquiry_type: "서비스 문의".into(),
            message: "hello<br>world".into(),
            submitted_at: "2024-05-01T09:30:00.000Z".into(),
        }
    }

    #[test]
    fn contact_email_fields() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };

        // Act
        let result = sut.render(&contact_email()).unwrap();

        // Assert
        assert!(result.contains("<td>Kim</td>"));
        assert!(result.contains("<td>Acme</td>"));
        assert!(result.contains("mailto:kim@x.com"));
        assert!(result.contains("<td>서비스 문의</td>"));
        assert!(result.contains("<td>2024-05-01T09:30:00.000Z</td>"));
    }

    #[test]
    fn contact_email_message_not_escaped() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };

        // Act
        let result = sut.render(&contact_email()).unwrap();

        // Assert
        assert!(result.contains("<p>hello<br>world</p>"));
    }

    #[test]
    fn contact_email_without_company() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };

        // Act
        let result = sut
            .render(&ContactEmailTemplate {
                company: String::new(),
                ..contact_email()
            })
            .unwrap();

        // Assert
        assert!(result.contains("<td>-</td>"));
    }
}
