pub mod email;
pub mod recaptcha;
pub mod sheets;
