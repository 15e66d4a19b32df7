use chrono::{DateTime, Duration, Local};
use service::gres::GresDialect;
use typed_builder::TypedBuilder;

const SACCT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Per-cycle inputs shared by every collector.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CollectContext {
    #[builder(default)]
    pub dialect: GresDialect,

    /// How far back `sacct` looks for completed jobs.
    #[builder(default = Duration::hours(30))]
    pub job_window: Duration,

    #[builder(default = Local::now())]
    pub now: DateTime<Local>,
}

impl CollectContext {
    /// `(start, end)` of the job window, formatted for `sacct -S/-E`.
    pub fn job_window_bounds(&self) -> (String, String) {
        let start = self.now - self.job_window;
        (
            start.format(SACCT_TIME_FORMAT).to_string(),
            self.now.format(SACCT_TIME_FORMAT).to_string(),
        )
    }
}
