use taxai_models::language::Language;

use crate::form::FormStatus;

/// Feedback shown below the contact form after a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBanner {
    Success,
    Error,
    CaptchaRequired,
}

impl StatusBanner {
    pub fn from_status(status: FormStatus) -> Option<Self> {
        match status {
            FormStatus::Idle | FormStatus::Submitting => None,
            FormStatus::Success => Some(Self::Success),
            FormStatus::Error => Some(Self::Error),
            FormStatus::CaptchaRequired => Some(Self::CaptchaRequired),
        }
    }

    pub fn message(self, language: Language) -> &'static str {
        match self {
            Self::Success => language.pick(
                "문의가 성공적으로 전송되었습니다!",
                "Your inquiry has been sent successfully!",
            ),
            Self::Error => language.pick(
                "전송에 실패했습니다. 다시 시도해주세요.",
                "Failed to send. Please try again.",
            ),
            Self::CaptchaRequired => language.pick(
                "보안 인증(CAPTCHA)을 완료해주세요.",
                "Please complete the security verification (CAPTCHA).",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_banner_while_idle_or_submitting() {
        assert_eq!(StatusBanner::from_status(FormStatus::Idle), None);
        assert_eq!(StatusBanner::from_status(FormStatus::Submitting), None);
    }

    #[test]
    fn messages() {
        assert_eq!(
            StatusBanner::Success.message(Language::Ko),
            "문의가 성공적으로 전송되었습니다!"
        );
        assert_eq!(
            StatusBanner::Error.message(Language::En),
            "Failed to send. Please try again."
        );
        assert_eq!(
            StatusBanner::from_status(FormStatus::CaptchaRequired)
                .map(|x| x.message(Language::En)),
            Some("Please complete the security verification (CAPTCHA).")
        );
    }
}
