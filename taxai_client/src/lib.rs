//! Client side of the contact form: the form state machine and the HTTP
//! client talking to the contact function.

pub use api::{ContactApi, ContactApiClient, ContactApiError, ContactApiResponse};
pub use banner::StatusBanner;
pub use form::{ContactForm, ContactFormConfig, FormField, FormStatus};
pub use toast::Toast;

pub mod api;
pub mod banner;
pub mod form;
pub mod toast;
