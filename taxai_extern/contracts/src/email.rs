use std::future::Future;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailApiService: Send + Sync + 'static {
    /// Send an email through the transactional email API and return the id
    /// assigned to it.
    fn send(
        &self,
        api_key: &str,
        email: Email,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub reply_to: Option<String>,
}

#[cfg(feature = "mock")]
impl MockEmailApiService {
    pub fn with_send(
        mut self,
        api_key: String,
        email: Email,
        result: anyhow::Result<String>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(api_key),
                mockall::predicate::eq(email),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
