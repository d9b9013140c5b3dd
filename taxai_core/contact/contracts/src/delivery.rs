use std::future::Future;

use chrono::{DateTime, Utc};
use taxai_models::contact::ContactSubmission;
use thiserror::Error;

/// Destination of validated contact form submissions.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactDeliveryService: Send + Sync + 'static {
    /// Deliver a submission exactly once. Failures are not retried.
    fn deliver(
        &self,
        submission: &ContactSubmission,
        submitted_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), ContactDeliveryError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactDeliveryError {
    /// A setting required by the delivery provider is missing.
    #[error("Delivery provider is not configured: {0}")]
    Configuration(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactDeliveryService {
    pub fn with_deliver(
        mut self,
        submission: ContactSubmission,
        submitted_at: DateTime<Utc>,
        result: Result<(), ContactDeliveryError>,
    ) -> Self {
        self.expect_deliver()
            .once()
            .withf(move |x, t| *x == submission && *t == submitted_at)
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
