use std::{fmt, future::Future};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SheetsApiService: Send + Sync + 'static {
    /// Append a single row to the given range of a spreadsheet.
    fn append_row(
        &self,
        service_account: &ServiceAccount,
        spreadsheet_id: &str,
        range: &str,
        row: Vec<String>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Credentials of a service account which has been granted write access to
/// the spreadsheet.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceAccount {
    pub client_email: String,
    /// PEM encoded RSA private key
    pub private_key: String,
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key", &"[redacted]")
            .finish()
    }
}

#[cfg(feature = "mock")]
impl MockSheetsApiService {
    pub fn with_append_row(
        mut self,
        service_account: ServiceAccount,
        spreadsheet_id: String,
        range: String,
        row: Vec<String>,
        result: anyhow::Result<()>,
    ) -> Self {
        self.expect_append_row()
            .once()
            .withf(move |sa, id, r, x| {
                *sa == service_account && id == spreadsheet_id && r == range && *x == row
            })
            .return_once(|_, _, _, _| Box::pin(std::future::ready(result)));
        self
    }
}
