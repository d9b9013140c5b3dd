use std::future::Future;

use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait CaptchaService: Send + Sync + 'static {
    /// Verify the captcha token submitted by the client.
    ///
    /// Always succeeds if no captcha secret has been configured.
    fn check<'a>(
        &self,
        token: Option<&'a str>,
    ) -> impl Future<Output = Result<(), CaptchaCheckError>> + Send;

    /// Whether submissions have to carry a captcha token.
    fn is_enabled(&self) -> bool;
}

#[derive(Debug, Error)]
pub enum CaptchaCheckError {
    #[error("The captcha token is missing.")]
    Missing,
    #[error("The captcha token is invalid or the user is probably not human.")]
    Failed { error_codes: Vec<String> },
}

#[cfg(feature = "mock")]
impl MockCaptchaService {
    pub fn with_check(
        mut self,
        token: Option<&'static str>,
        result: Result<(), CaptchaCheckError>,
    ) -> Self {
        self.expect_check()
            .once()
            .withf(move |x| *x == token)
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_is_enabled(mut self, enabled: bool) -> Self {
        self.expect_is_enabled().return_const(enabled);
        self
    }
}
