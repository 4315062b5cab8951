use serde_json::{Map, Value};

use crate::tracker::OutstandingJobs;
use crate::view_model::AppViewModel;

pub type JobId = String;

/// CSV chosen in the upload form. The payload is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub job_id: JobId,
    pub keyword: String,
}

impl Job {
    pub fn new(job_id: impl Into<JobId>, keyword: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            keyword: keyword.into(),
        }
    }
}

/// One result record. Everything besides `job_id` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobResult {
    pub job_id: JobId,
    pub payload: Map<String, Value>,
}

impl JobResult {
    pub fn new(job_id: impl Into<JobId>) -> Self {
        Self {
            job_id: job_id.into(),
            payload: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Polling,
    Done,
    Failed,
    Stopped,
}

impl Phase {
    pub fn is_loading(self) -> bool {
        matches!(self, Phase::Uploading | Phase::Polling)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    selected: Option<SelectedFile>,
    keywords: Vec<String>,
    outstanding: OutstandingJobs,
    results: Vec<JobResult>,
    phase: Phase,
    fetch_in_flight: bool,
    uploads: u32,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            selected_file: self.selected.as_ref().map(|file| file.name.clone()),
            submit_enabled: !self.phase.is_loading(),
            keywords: self.keywords.clone(),
            results: self.results.clone(),
            outstanding: self.outstanding.ids().to_vec(),
            phase: self.phase,
            loading: self.phase.is_loading(),
            polling: self.is_polling(),
            uploads: self.uploads,
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_polling(&self) -> bool {
        self.phase == Phase::Polling
    }

    pub fn outstanding(&self) -> &OutstandingJobs {
        &self.outstanding
    }

    pub fn results(&self) -> &[JobResult] {
        &self.results
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub(crate) fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub(crate) fn select_file(&mut self, file: Option<SelectedFile>) {
        self.selected = file;
        self.dirty = true;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_upload(&mut self) {
        self.uploads += 1;
        self.set_phase(Phase::Uploading);
    }

    /// Replaces keywords and outstanding ids with the latest upload. Results
    /// from earlier uploads are kept.
    pub(crate) fn apply_jobs(&mut self, jobs: Vec<Job>) {
        let (ids, keywords): (Vec<_>, Vec<_>) = jobs
            .into_iter()
            .map(|job| (job.job_id, job.keyword))
            .unzip();
        self.keywords = keywords;
        self.outstanding.replace(ids);
        self.dirty = true;
    }

    pub(crate) fn is_fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    pub(crate) fn set_fetch_in_flight(&mut self, in_flight: bool) {
        self.fetch_in_flight = in_flight;
    }

    /// Appends the batch, then drops every id it satisfied. Returns how many
    /// ids were removed.
    pub(crate) fn merge_results(&mut self, batch: Vec<JobResult>) -> usize {
        if batch.is_empty() {
            return 0;
        }
        let start = self.results.len();
        self.results.extend(batch);
        let removed = self.outstanding.reconcile(&self.results[start..]);
        self.dirty = true;
        removed
    }
}
