use std::error::Error;
use std::sync::Arc;

pub type LogResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Line-oriented log sink shared by every component.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str) -> LogResult;

    /// Per-frame detail. Sinks may drop these unless verbose output was requested.
    fn debug(&self, message: &str) -> LogResult;

    /// Child logger whose lines are prefixed with `namespace`, nested under
    /// any namespace this logger already has.
    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync>;
}
