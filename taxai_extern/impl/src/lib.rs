pub mod email;
pub mod http;
pub mod recaptcha;
pub mod sheets;
