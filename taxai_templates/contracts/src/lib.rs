use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template to html.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T>(mut self, template: T, html: String) -> Self
    where
        T: Template + PartialEq + std::fmt::Debug + Send + 'static,
    {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(html));
        self
    }
}

/// A template together with the values rendered into it.
pub trait Template: Serialize {
    /// Name the template is registered under. Names without a file extension
    /// are rendered without html escaping.
    const NAME: &'static str;
    const SOURCE: &'static str;
}

/// All templates as `(name, source)` pairs.
pub const TEMPLATES: &[(&str, &str)] =
    &[(ContactEmailTemplate::NAME, ContactEmailTemplate::SOURCE)];

/// Notification sent to the operators for every contact form submission.
///
/// Values are inserted verbatim, `message` is expected to already contain
/// `<br>` line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEmailTemplate {
    pub name: String,
    pub company: String,
    pub email: String,
    pub inquiry_type: String,
    pub message: String,
    pub submitted_at: String,
}

impl Template for ContactEmailTemplate {
    const NAME: &'static str = "contact_email";
    const SOURCE: &'static str = include_str!("../templates/contact.html");
}
