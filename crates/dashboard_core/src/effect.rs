use std::time::Duration;

use crate::{JobId, SelectedFile};

/// Fixed period between two poll ticks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post the file as multipart field `file` to the upload endpoint.
    Upload { file: SelectedFile },
    StartPolling { interval: Duration },
    /// Ask the results endpoint for the given outstanding ids.
    FetchResults { job_ids: Vec<JobId> },
    StopPolling,
}
