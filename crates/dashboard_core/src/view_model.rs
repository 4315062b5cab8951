use crate::{JobId, JobResult, Phase};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub selected_file: Option<String>,
    pub submit_enabled: bool,
    pub keywords: Vec<String>,
    pub results: Vec<JobResult>,
    pub outstanding: Vec<JobId>,
    pub phase: Phase,
    pub loading: bool,
    pub polling: bool,
    /// Number of upload attempts so far.
    pub uploads: u32,
    pub dirty: bool,
}

impl AppViewModel {
    /// True once an upload cycle has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.uploads > 0 && matches!(self.phase, Phase::Done | Phase::Failed | Phase::Stopped)
    }
}
