use domain::model::entity::JobDuration;
use domain::FormatError;

use crate::aggregate::{split_lines, Delimiter};
use crate::primitive::parse_duration;

/// Job durations from `sacct -a -X -n -o JobID,JobName,User,Elapsed`.
///
/// Rows whose elapsed time cannot be read are dropped.
pub fn parse_job_metrics(input: &str) -> Vec<JobDuration> {
    split_lines(input)
        .into_iter()
        .filter_map(|line| match parse_job_line(line) {
            Ok(job) => job,
            Err(e) => {
                tracing::warn!("Skipping sacct row: {e}");
                None
            }
        })
        .collect()
}

/// `Ok(None)` for rows with fewer than four columns.
pub fn parse_job_line(line: &str) -> Result<Option<JobDuration>, FormatError> {
    let fields = Delimiter::Whitespace.split(line);
    let &[job_id, job_name, user, elapsed, ..] = fields.as_slice() else {
        return Ok(None);
    };
    Ok(Some(JobDuration {
        job_id: job_id.to_owned(),
        job_name: job_name.to_owned(),
        user: user.to_owned(),
        elapsed: parse_duration(elapsed)?,
    }))
}
