use std::{convert::Infallible, fmt, str::FromStr};

use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Contact form data as it is sent over the wire.
///
/// This is the unvalidated shape of a submission: every field may be empty.
/// The server validates it into a [`ContactSubmission`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub inquiry_type: String,
    #[serde(default)]
    pub message: String,
    /// Client side submission time. Informational only, the server always
    /// uses its own clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub captcha_token: Option<String>,
}

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub company: String,
    pub email: ContactEmail,
    pub inquiry_type: InquiryType,
    pub message: ContactMessage,
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

/// Email address of the submitter.
///
/// Only checked for presence, the address itself is passed through as is.
#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

/// Category of an inquiry.
///
/// The form offers a fixed set of options, but any other value is accepted
/// and kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum InquiryType {
    #[default]
    Service,
    Partnership,
    Technical,
    Demo,
    Pricing,
    Other,
    Custom(String),
}

impl InquiryType {
    /// The options offered by the contact form, in display order.
    pub const OPTIONS: [Self; 6] = [
        Self::Service,
        Self::Partnership,
        Self::Technical,
        Self::Demo,
        Self::Pricing,
        Self::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Service => "service",
            Self::Partnership => "partnership",
            Self::Technical => "technical",
            Self::Demo => "demo",
            Self::Pricing => "pricing",
            Self::Other => "other",
            Self::Custom(value) => value,
        }
    }

    /// Human readable label of this inquiry type.
    ///
    /// Custom values are displayed as submitted.
    pub fn label(&self, language: Language) -> &str {
        match self {
            Self::Service => language.pick("서비스 문의", "Service Inquiry"),
            Self::Partnership => language.pick("제휴 문의", "Partnership"),
            Self::Technical => language.pick("기술 문의", "Technical Support"),
            Self::Demo => language.pick("데모 요청", "Demo Request"),
            Self::Pricing => language.pick("가격 문의", "Pricing"),
            Self::Other => language.pick("기타", "Other"),
            Self::Custom(value) => value,
        }
    }
}

impl FromStr for InquiryType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "service" => Self::Service,
            "partnership" => Self::Partnership,
            "technical" => Self::Technical,
            "demo" => Self::Demo,
            "pricing" => Self::Pricing,
            "other" => Self::Other,
            _ => Self::Custom(s.into()),
        })
    }
}

impl From<String> for InquiryType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(Self::Custom(_)) => Self::Custom(value),
            Ok(known) => known,
            Err(err) => match err {},
        }
    }
}

impl fmt::Display for InquiryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InquiryType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InquiryType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn inquiry_type_roundtrip_known_values() {
        for inquiry_type in InquiryType::OPTIONS {
            let parsed = inquiry_type.as_str().parse::<InquiryType>().unwrap();
            assert_eq!(parsed, inquiry_type);
        }
    }

    #[test]
    fn inquiry_type_custom_value() {
        let inquiry_type = InquiryType::from("세무 상담".to_owned());
        assert_eq!(inquiry_type, InquiryType::Custom("세무 상담".into()));
        assert_eq!(inquiry_type.label(Language::En), "세무 상담");
    }

    #[test]
    fn inquiry_type_labels() {
        assert_eq!(InquiryType::Service.label(Language::Ko), "서비스 문의");
        assert_eq!(InquiryType::Service.label(Language::En), "Service Inquiry");
    }

    #[test]
    fn form_data_from_client_json() {
        let json = serde_json::json!({
            "name": "Kim",
            "company": "Acme",
            "email": "kim@x.com",
            "inquiryType": "service",
            "message": "hello",
            "timestamp": "2025-01-01T00:00:00.000Z",
            "captchaToken": null,
        });

        let form = serde_json::from_value::<ContactFormData>(json).unwrap();

        assert_eq!(
            form,
            ContactFormData {
                name: "Kim".into(),
                company: "Acme".into(),
                email: "kim@x.com".into(),
                inquiry_type: "service".into(),
                message: "hello".into(),
                timestamp: Some("2025-01-01T00:00:00.000Z".into()),
                captcha_token: None,
            }
        );
    }

    #[test]
    fn form_data_missing_optional_fields() {
        let json = serde_json::json!({"name": "Kim", "email": "kim@x.com", "message": "hi"});

        let form = serde_json::from_value::<ContactFormData>(json).unwrap();

        assert_eq!(form.company, "");
        assert_eq!(form.inquiry_type, "");
        assert_eq!(form.captcha_token, None);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(ContactName::try_new(String::new()).is_err());
        assert!(ContactName::try_new("Kim".to_owned()).is_ok());
    }
}
