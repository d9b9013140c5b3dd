use std::sync::LazyLock;

use taxai_models::contact::{ContactFormData, ContactSubmission, InquiryType};

use crate::CAPTCHA_TOKEN;

pub static KIM_FORM: LazyLock<ContactFormData> = LazyLock::new(|| ContactFormData {
    name: "Kim".into(),
    company: "Acme".into(),
    email: "kim@x.com".into(),
    inquiry_type: "service".into(),
    message: "hello".into(),
    timestamp: Some("2024-05-01T09:29:58.123Z".into()),
    captcha_token: None,
});

pub static KIM_FORM_WITH_CAPTCHA: LazyLock<ContactFormData> = LazyLock::new(|| ContactFormData {
    captcha_token: Some(CAPTCHA_TOKEN.into()),
    ..KIM_FORM.clone()
});

pub static KIM: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Kim".try_into().unwrap(),
    company: "Acme".into(),
    email: "kim@x.com".try_into().unwrap(),
    inquiry_type: InquiryType::Service,
    message: "hello".try_into().unwrap(),
});

pub static LEE_FORM: LazyLock<ContactFormData> = LazyLock::new(|| ContactFormData {
    name: "이서연".into(),
    company: String::new(),
    email: "seoyeon.lee@example.kr".into(),
    inquiry_type: "세무 상담".into(),
    message: "부가세 신고 자동화가 가능한가요?\n법인 고객입니다.".into(),
    timestamp: None,
    captcha_token: None,
});

pub static LEE: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "이서연".try_into().unwrap(),
    company: String::new(),
    email: "seoyeon.lee@example.kr".try_into().unwrap(),
    inquiry_type: InquiryType::Custom("세무 상담".into()),
    message: "부가세 신고 자동화가 가능한가요?\n법인 고객입니다."
        .try_into()
        .unwrap(),
});
