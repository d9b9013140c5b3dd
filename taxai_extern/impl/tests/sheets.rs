use taxai_di::{provider, Provides};
use taxai_extern_contracts::sheets::{ServiceAccount, SheetsApiService};
use taxai_extern_impl::sheets::{SheetsApiServiceConfig, SheetsApiServiceImpl};
use taxai_testing::sheets::{AppendedRow, SheetsState, TOKEN_ROUTE};

const PRIVATE_KEY: &str = include_str!("fixtures/service_account.pem");

#[tokio::test]
async fn append_row() {
    // Arrange
    let (sut, state) = make_sut().await;
    let row = vec![
        "2024-05-01T09:30:00.000Z".to_owned(),
        "Kim".into(),
        "Acme".into(),
        "kim@x.com".into(),
        "service".into(),
        "hello".into(),
    ];

    // Act
    let result = sut
        .append_row(&service_account(), "sheet-id", "Sheet1!A:F", row.clone())
        .await;

    // Assert
    result.unwrap();
    assert_eq!(
        state.rows(),
        [AppendedRow {
            spreadsheet_id: "sheet-id".into(),
            range: "Sheet1!A:F".into(),
            values: row,
        }]
    );
}

#[tokio::test]
async fn append_row_invalid_private_key() {
    // Arrange
    let (sut, state) = make_sut().await;
    let service_account = ServiceAccount {
        private_key: "not a pem key".into(),
        ..service_account()
    };

    // Act
    let result = sut
        .append_row(&service_account, "sheet-id", "Sheet1!A:F", vec!["x".into()])
        .await;

    // Assert
    assert!(result.is_err());
    assert!(state.rows().is_empty());
}

fn service_account() -> ServiceAccount {
    ServiceAccount {
        client_email: "contact-form@taxai.iam.gserviceaccount.com".into(),
        private_key: PRIVATE_KEY.into(),
    }
}

async fn make_sut() -> (SheetsApiServiceImpl, SheetsState) {
    let state = SheetsState::default();
    let addr = taxai_testing::spawn(taxai_testing::sheets::router(state.clone()))
        .await
        .unwrap();
    let token_endpoint = format!("http://{addr}{TOKEN_ROUTE}").parse().unwrap();
    let api_endpoint = format!("http://{addr}/").parse().unwrap();

    provider! {
        Provider { sheets_api_service_config: SheetsApiServiceConfig, }
    }

    let mut provider = Provider {
        _cache: Default::default(),
        sheets_api_service_config: SheetsApiServiceConfig::new(
            Some(token_endpoint),
            Some(api_endpoint),
        ),
    };

    (provider.provide(), state)
}
