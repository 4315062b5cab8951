use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub type JobId = String;

/// One entry of the upload response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedJob {
    #[serde(rename = "jobId")]
    pub job_id: JobId,
    pub keyword: String,
}

/// One entry of the results response. Unknown fields are kept in `fields`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultRecord {
    pub job_id: JobId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    UploadCompleted(Result<Vec<UploadedJob>, ClientError>),
    ResultsFetched {
        job_ids: Vec<JobId>,
        result: Result<Vec<ResultRecord>, ClientError>,
    },
    PollTick,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("network error: {0}")]
    Network(String),
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}
