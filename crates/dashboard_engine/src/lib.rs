//! Dashboard engine: HTTP client, poll timer and effect execution.
mod client;
mod engine;
mod poller;
mod types;

pub use client::{
    results_url, upload_url, ClientSettings, DashboardApi, ReqwestDashboardClient, RESULTS_PATH,
    UPLOAD_PATH,
};
pub use engine::EngineHandle;
pub use poller::Poller;
pub use types::{
    ChannelEventSink, ClientError, EngineEvent, EventSink, JobId, ResultRecord, UploadFile,
    UploadedJob,
};
