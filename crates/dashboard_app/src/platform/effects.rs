use std::sync::{mpsc, Arc};

use dashboard_core::{Effect, Job, JobResult, Msg, SelectedFile};
use dashboard_engine::{
    ClientError, ClientSettings, EngineEvent, EngineHandle, EventSink, ReqwestDashboardClient,
    UploadFile,
};
use dashboard_logging::{dashboard_debug, dashboard_info, dashboard_warn};

use super::app::AppInput;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        input_tx: mpsc::Sender<AppInput>,
    ) -> Result<Self, ClientError> {
        let client = ReqwestDashboardClient::new(settings)?;
        let engine = EngineHandle::new(Arc::new(client), Arc::new(MsgSink { tx: input_tx }));
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Upload { file } => {
                    dashboard_info!("Upload file={} bytes={}", file.name, file.bytes.len());
                    self.engine.upload(to_upload_file(file));
                }
                Effect::StartPolling { interval } => {
                    dashboard_info!("StartPolling interval={:?}", interval);
                    self.engine.start_polling(interval);
                }
                Effect::FetchResults { job_ids } => {
                    dashboard_debug!("FetchResults outstanding={}", job_ids.len());
                    self.engine.fetch_results(job_ids);
                }
                Effect::StopPolling => {
                    dashboard_info!("StopPolling");
                    self.engine.stop_polling();
                }
            }
        }
    }
}

/// Feeds engine events back into the dispatch loop.
struct MsgSink {
    tx: mpsc::Sender<AppInput>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppInput::Msg(map_event(event)));
    }
}

fn to_upload_file(file: SelectedFile) -> UploadFile {
    UploadFile {
        file_name: file.name,
        bytes: file.bytes,
    }
}

/// Converts an engine event into a core message. Failures are logged here
/// and reach the core only as opaque reasons.
pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted(Ok(jobs)) => {
            dashboard_info!("Upload accepted with {} job(s)", jobs.len());
            Msg::UploadSucceeded(
                jobs.into_iter()
                    .map(|job| Job::new(job.job_id, job.keyword))
                    .collect(),
            )
        }
        EngineEvent::UploadCompleted(Err(err)) => {
            dashboard_warn!("Error processing file upload: {}", err);
            Msg::UploadFailed(err.to_string())
        }
        EngineEvent::ResultsFetched {
            job_ids,
            result: Ok(records),
        } => {
            dashboard_debug!(
                "Fetched {} result(s) for {} outstanding job(s)",
                records.len(),
                job_ids.len()
            );
            Msg::ResultsArrived(
                records
                    .into_iter()
                    .map(|record| JobResult {
                        job_id: record.job_id,
                        payload: record.fields,
                    })
                    .collect(),
            )
        }
        EngineEvent::ResultsFetched {
            job_ids,
            result: Err(err),
        } => {
            dashboard_warn!(
                "Error fetching new results for {} job(s): {}",
                job_ids.len(),
                err
            );
            Msg::PollFailed(err.to_string())
        }
        EngineEvent::PollTick => Msg::PollTick,
    }
}
