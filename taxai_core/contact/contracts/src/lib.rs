use std::future::Future;

use taxai_models::contact::ContactFormData;
use thiserror::Error;

pub mod delivery;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission, verify its captcha token and
    /// deliver it.
    fn submit(
        &self,
        form: ContactFormData,
    ) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Name, email, and message are required.")]
    MissingFields,
    #[error("The captcha token is required.")]
    CaptchaRequired,
    #[error("The captcha verification failed.")]
    CaptchaFailed { error_codes: Vec<String> },
    #[error(transparent)]
    Delivery(#[from] delivery::ContactDeliveryError),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        form: ContactFormData,
        result: Result<(), ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
