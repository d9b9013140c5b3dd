use taxai_core_contact_contracts::delivery::MockContactDeliveryService;
use taxai_shared_contracts::{captcha::MockCaptchaService, time::MockTimeService};

use crate::ContactFeatureServiceImpl;


type Sut =
    ContactFeatureServiceImpl<MockTimeService, MockCaptchaService, MockContactDeliveryService>;
