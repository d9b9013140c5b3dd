use chrono::{DateTime, Utc};
use taxai_core_contact_contracts::delivery::{ContactDeliveryError, ContactDeliveryService};
use taxai_di::Build;
use taxai_models::contact::ContactSubmission;
use taxai_utils::trace_instrument;

pub mod email;
pub mod sheets;

/// Forwards submissions to the delivery provider selected in the
/// configuration.
#[derive(Debug, Clone, Build)]
pub struct ContactDeliveryServiceImpl<Sheets, Email> {
    sheets: Sheets,
    email: Email,
    config: ContactDeliveryServiceConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactDeliveryServiceConfig {
    pub provider: ContactDeliveryProvider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactDeliveryProvider {
    Sheets,
    Email,
}

impl<Sheets, Email> ContactDeliveryService for ContactDeliveryServiceImpl<Sheets, Email>
where
    Sheets: ContactDeliveryService,
    Email: ContactDeliveryService,
{
    #[trace_instrument(skip(self, submission), fields(provider = ?self.config.provider))]
    async fn deliver(
        &self,
        submission: &ContactSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<(), ContactDeliveryError> {
        match self.config.provider {
            ContactDeliveryProvider::Sheets => self.sheets.deliver(submission, submitted_at).await,
            ContactDeliveryProvider::Email => self.email.deliver(submission, submitted_at).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use taxai_core_contact_contracts::delivery::MockContactDeliveryService;
    use taxai_demo::{contact::KIM, SUBMITTED_AT};

    use super::*;

    #[tokio::test]
    async fn sheets() {
        // Arrange
        let sheets =
            MockContactDeliveryService::new().with_deliver(KIM.clone(), *SUBMITTED_AT, Ok(()));

        let sut = ContactDeliveryServiceImpl {
            sheets,
            email: MockContactDeliveryService::new(),
            config: ContactDeliveryServiceConfig {
                provider: ContactDeliveryProvider::Sheets,
            },
        };

        // Act
        let result = sut.deliver(&KIM, *SUBMITTED_AT).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn email() {
        // Arrange
        let email = MockContactDeliveryService::new().with_deliver(
            KIM.clone(),
            *SUBMITTED_AT,
            Err(ContactDeliveryError::Configuration("email.api_key")),
        );

        let sut = ContactDeliveryServiceImpl {
            sheets: MockContactDeliveryService::new(),
            email,
            config: ContactDeliveryServiceConfig {
                provider: ContactDeliveryProvider::Email,
            },
        };

        // Act
        let result = sut.deliver(&KIM, *SUBMITTED_AT).await;

        // Assert
        taxai_utils::assert_matches!(
            result,
            Err(ContactDeliveryError::Configuration("email.api_key"))
        );
    }
}
