use taxai_di::{provider, Provides};
use taxai_extern_contracts::email::{Email, EmailApiService};
use taxai_extern_impl::email::{EmailApiServiceConfig, EmailApiServiceImpl};
use taxai_testing::email::{EmailState, SentEmail, EMAILS_ROUTE};

const API_KEY: &str = "test-api-key";

#[tokio::test]
async fn send() {
    // Arrange
    let (sut, state) = make_sut().await;

    // Act
    let result = sut.send(API_KEY, email()).await;

    // Assert
    assert_eq!(result.unwrap(), "email-1");
    assert_eq!(
        state.sent(),
        [SentEmail {
            from: "noreply@taxai.example".into(),
            to: vec!["contact@taxai.example".into()],
            subject: "New inquiry".into(),
            html: "<p>hello</p>".into(),
            reply_to: Some("kim@x.com".into()),
        }]
    );
}

#[tokio::test]
async fn send_invalid_api_key() {
    // Arrange
    let (sut, state) = make_sut().await;

    // Act
    let result = sut.send("wrong", email()).await;

    // Assert
    let err = result.unwrap_err();
    assert!(err.to_string().contains("401"), "{err}");
    assert!(state.sent().is_empty());
}

fn email() -> Email {
    Email {
        from: "noreply@taxai.example".into(),
        to: "contact@taxai.example".into(),
        subject: "New inquiry".into(),
        html: "<p>hello</p>".into(),
        reply_to: Some("kim@x.com".into()),
    }
}

async fn make_sut() -> (EmailApiServiceImpl, EmailState) {
    let state = EmailState::new(API_KEY);
    let addr = taxai_testing::spawn(taxai_testing::email::router(state.clone()))
        .await
        .unwrap();
    let endpoint = format!("http://{addr}{EMAILS_ROUTE}").parse().unwrap();

    provider! {
        Provider { email_api_service_config: EmailApiServiceConfig, }
    }

    let mut provider = Provider {
        _cache: Default::default(),
        email_api_service_config: EmailApiServiceConfig::new(Some(endpoint)),
    };

    (provider.provide(), state)
}
