//! Dashboard core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod tracker;
mod update;
mod view_model;

pub use effect::{Effect, POLL_INTERVAL};
pub use msg::Msg;
pub use state::{AppState, Job, JobId, JobResult, Phase, SelectedFile};
pub use tracker::OutstandingJobs;
pub use update::update;
pub use view_model::AppViewModel;
