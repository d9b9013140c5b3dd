use taxai_core_contact_impl::{
    delivery::{
        email::ContactEmailDeliveryServiceImpl, sheets::ContactSheetsDeliveryServiceImpl,
        ContactDeliveryServiceImpl,
    },
    ContactFeatureServiceImpl,
};
use taxai_extern_impl::{
    email::EmailApiServiceImpl, recaptcha::RecaptchaApiServiceImpl, sheets::SheetsApiServiceImpl,
};
use taxai_shared_impl::{captcha::CaptchaServiceImpl, time::TimeServiceImpl};
use taxai_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = taxai_api_rest::RestServer<ContactFeature>;
pub type ContactFunction = taxai_api_rest::ContactFunction<ContactFeature>;

// Extern
pub type RecaptchaApi = RecaptchaApiServiceImpl;
pub type SheetsApi = SheetsApiServiceImpl;
pub type EmailApi = EmailApiServiceImpl;

// Templates
pub type Template = TemplateServiceImpl;

// Shared
pub type Captcha = CaptchaServiceImpl<RecaptchaApi>;
pub type Time = TimeServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Time, Captcha, ContactDelivery>;
pub type ContactDelivery = ContactDeliveryServiceImpl<ContactSheetsDelivery, ContactEmailDelivery>;
pub type ContactSheetsDelivery = ContactSheetsDeliveryServiceImpl<SheetsApi>;
pub type ContactEmailDelivery = ContactEmailDeliveryServiceImpl<EmailApi, Template>;
