mod notifier;
mod reporter;

pub use notifier::{LogNotifier, Notifier, NotifierError};
pub use reporter::{report_body, MigrationReporter, ReportError, REPORT_SUBJECT};
