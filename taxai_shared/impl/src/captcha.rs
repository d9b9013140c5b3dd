use std::sync::Arc;

use taxai_di::Build;
use taxai_extern_contracts::recaptcha::RecaptchaApiService;
use taxai_shared_contracts::captcha::{CaptchaCheckError, CaptchaService};
use taxai_utils::trace_instrument;
use tracing::{error, warn};

#[derive(Debug, Clone, Build)]
pub struct CaptchaServiceImpl<RecaptchaApi> {
    recaptcha_api: RecaptchaApi,
    config: CaptchaServiceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptchaServiceConfig {
    Disabled,
    Recaptcha(RecaptchaCaptchaServiceConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecaptchaCaptchaServiceConfig {
    pub secret: Arc<str>,
}

impl<RecaptchaApi> CaptchaService for CaptchaServiceImpl<RecaptchaApi>
where
    RecaptchaApi: RecaptchaApiService,
{
    #[trace_instrument(skip(self, token))]
    async fn check(&self, token: Option<&str>) -> Result<(), CaptchaCheckError> {
        let CaptchaServiceConfig::Recaptcha(config) = &self.config else {
            return Ok(());
        };

        let token = token
            .filter(|x| !x.is_empty())
            .ok_or(CaptchaCheckError::Missing)?;

        let response = self
            .recaptcha_api
            .siteverify(token, &config.secret)
            .await
            .map_err(|err| {
                error!("Failed to verify captcha token: {err:#}");
                CaptchaCheckError::Failed {
                    error_codes: Vec::new(),
                }
            })?;

        if !response.success {
            warn!(error_codes = ?response.error_codes, "Captcha verification failed");
            return Err(CaptchaCheckError::Failed {
                error_codes: response.error_codes,
            });
        }

        Ok(())
    }

    fn is_enabled(&self) -> bool {
        matches!(self.config, CaptchaServiceConfig::Recaptcha(_))
    }
}

#[cfg(test)]
mod tests {
    use taxai_extern_contracts::recaptcha::{MockRecaptchaApiService, RecaptchaSiteverifyResponse};
    use taxai_utils::assert_matches;

    use super::*;

    fn recaptcha_config() -> CaptchaServiceConfig {
        CaptchaServiceConfig::Recaptcha(RecaptchaCaptchaServiceConfig {
            secret: "captcha secret".into(),
        })
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha token".into(),
            "captcha secret".into(),
            RecaptchaSiteverifyResponse {
                success: true,
                error_codes: vec![],
            },
        );

        let sut = CaptchaServiceImpl {
            recaptcha_api,
            config: recaptcha_config(),
        };

        // Act
        let result = sut.check(Some("captcha token")).await;

        // Assert
        result.unwrap();
        assert!(sut.is_enabled());
    }

    #[tokio::test]
    async fn ok_disabled() {
        // Arrange
        let sut = CaptchaServiceImpl {
            recaptcha_api: MockRecaptchaApiService::new(),
            config: CaptchaServiceConfig::Disabled,
        };

        // Act
        let result = sut.check(Some("captcha token")).await;

        // Assert
        result.unwrap();
        assert!(!sut.is_enabled());
    }

    #[tokio::test]
    async fn ok_disabled_no_token() {
        // Arrange
        let sut = CaptchaServiceImpl {
            recaptcha_api: MockRecaptchaApiService::new(),
            config: CaptchaServiceConfig::Disabled,
        };

        // Act
        let result = sut.check(None).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn missing_token() {
        // Arrange
        let sut = CaptchaServiceImpl {
            recaptcha_api: MockRecaptchaApiService::new(),
            config: recaptcha_config(),
        };

        // Act
        let result = sut.check(None).await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Missing));
    }

    #[tokio::test]
    async fn empty_token() {
        // Arrange
        let sut = CaptchaServiceImpl {
            recaptcha_api: MockRecaptchaApiService::new(),
            config: recaptcha_config(),
        };

        // Act
        let result = sut.check(Some("")).await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Missing));
    }

    #[tokio::test]
    async fn failed() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha token".into(),
            "captcha secret".into(),
            RecaptchaSiteverifyResponse {
                success: false,
                error_codes: vec!["timeout-or-duplicate".into()],
            },
        );

        let sut = CaptchaServiceImpl {
            recaptcha_api,
            config: recaptcha_config(),
        };

        // Act
        let result = sut.check(Some("captcha token")).await;

        // Assert
        assert_matches!(
            result,
            Err(CaptchaCheckError::Failed { error_codes }) if *error_codes == ["timeout-or-duplicate"]
        );
    }

    #[tokio::test]
    async fn failed_network_error() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new()
            .with_siteverify_error("captcha token".into(), "captcha secret".into());

        let sut = CaptchaServiceImpl {
            recaptcha_api,
            config: recaptcha_config(),
        };

        // Act
        let result = sut.check(Some("captcha token")).await;

        // Assert
        assert_matches!(
            result,
            Err(CaptchaCheckError::Failed { error_codes }) if error_codes.is_empty()
        );
    }
}
