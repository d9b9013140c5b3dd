use taxai_core_contact_contracts::{
    delivery::ContactDeliveryService, ContactFeatureService, ContactSubmitError,
};
use taxai_di::Build;
use taxai_models::contact::{ContactFormData, ContactSubmission};
use taxai_shared_contracts::{
    captcha::{CaptchaCheckError, CaptchaService},
    time::TimeService,
};
use taxai_utils::trace_instrument;
use tracing::info;

pub mod delivery;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build)]
#[cfg_attr(test, derive(Default))]
pub struct ContactFeatureServiceImpl<Time, Captcha, Delivery> {
    time: Time,
    captcha: Captcha,
    delivery: Delivery,
}

impl<Time, Captcha, Delivery> ContactFeatureService
    for ContactFeatureServiceImpl<Time, Captcha, Delivery>
where
    Time: TimeService,
    Captcha: CaptchaService,
    Delivery: ContactDeliveryService,
{
    #[trace_instrument(skip(self, form))]
    async fn submit(&self, form: ContactFormData) -> Result<(), ContactSubmitError> {
        let captcha_token = form.captcha_token.clone();
        let submission = validate(form).ok_or(ContactSubmitError::MissingFields)?;

        self.captcha
            .check(captcha_token.as_deref())
            .await
            .map_err(|err| match err {
                CaptchaCheckError::Missing => ContactSubmitError::CaptchaRequired,
                CaptchaCheckError::Failed { error_codes } => {
                    ContactSubmitError::CaptchaFailed { error_codes }
                }
            })?;

        let submitted_at = self.time.now();
        self.delivery.deliver(&submission, submitted_at).await?;

        info!(
            inquiry_type = %submission.inquiry_type,
            %submitted_at,
            "Contact form submission delivered"
        );

        Ok(())
    }
}

/// Check that all required fields are present.
fn validate(form: ContactFormData) -> Option<ContactSubmission> {
    Some(ContactSubmission {
        name: form.name.try_into().ok()?,
        company: form.company,
        email: form.email.try_into().ok()?,
        inquiry_type: form.inquiry_type.into(),
        message: form.message.try_into().ok()?,
    })
}
