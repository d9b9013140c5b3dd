use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use taxai_core_contact_contracts::delivery::{ContactDeliveryError, ContactDeliveryService};
use taxai_di::Build;
use taxai_extern_contracts::sheets::{ServiceAccount, SheetsApiService};
use taxai_models::contact::ContactSubmission;
use taxai_utils::trace_instrument;
use tracing::error;

/// Appends every submission as a new row to a spreadsheet.
#[derive(Debug, Clone, Build)]
pub struct ContactSheetsDeliveryServiceImpl<SheetsApi> {
    sheets_api: SheetsApi,
    config: ContactSheetsDeliveryServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactSheetsDeliveryServiceConfig {
    pub spreadsheet_id: Option<Arc<str>>,
    pub range: Arc<str>,
    pub service_account: Option<Arc<ServiceAccount>>,
}

impl<SheetsApi> ContactDeliveryService for ContactSheetsDeliveryServiceImpl<SheetsApi>
where
    SheetsApi: SheetsApiService,
{
    #[trace_instrument(skip(self, submission))]
    async fn deliver(
        &self,
        submission: &ContactSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<(), ContactDeliveryError> {
        let Some(spreadsheet_id) = &self.config.spreadsheet_id else {
            error!("No spreadsheet id has been configured");
            return Err(ContactDeliveryError::Configuration("sheets.spreadsheet_id"));
        };
        let Some(service_account) = &self.config.service_account else {
            error!("No service account has been configured");
            return Err(ContactDeliveryError::Configuration("sheets.service_account"));
        };

        self.sheets_api
            .append_row(
                service_account,
                spreadsheet_id,
                &self.config.range,
                row(submission, submitted_at),
            )
            .await
            .context("Failed to append submission to spreadsheet")
            .map_err(Into::into)
    }
}

/// Columns: timestamp, name, company, email, inquiry type, message
fn row(submission: &ContactSubmission, submitted_at: DateTime<Utc>) -> Vec<String> {
    vec![
        submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        (*submission.name).clone(),
        submission.company.clone(),
        (*submission.email).clone(),
        submission.inquiry_type.as_str().into(),
        (*submission.message).clone(),
    ]
}
