use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::models::MigrationSummary;
use crate::report::{Notifier, NotifierError};

pub const REPORT_SUBJECT: &str = "Migration Report";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not send report email: {0}")]
    Delivery(#[from] NotifierError)
}

/// Formats a run summary as the two-line report body.
pub fn report_body(summary: &MigrationSummary) -> String {
    [
        format!("Total Records Processed: {}", summary.total_records),
        format!("Total Users Updated: {}", summary.users_updated),
    ].join("\n")
}

pub struct MigrationReporter<N: Notifier> {
    notifier: Arc<N>
}

impl<N: Notifier> MigrationReporter<N> {
    pub fn new(notifier: Arc<N>) -> Self {
        Self { notifier }
    }

    /// Sends the summary once. Delivery failures are not retried.
    pub async fn send_report(&self, summary: &MigrationSummary, to: &[String]) -> Result<(), ReportError> {
        let body = report_body(summary);

        self.notifier.send(to, REPORT_SUBJECT, &body).await.map_err(|cause| {
            let report_error = ReportError::from(cause);
            error!("{report_error}");
            report_error
        })
    }
}
