use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use dashboard_logging::{dashboard_debug, dashboard_error, dashboard_info};

use crate::poller::Poller;
use crate::{DashboardApi, EngineEvent, EventSink, JobId, UploadFile};

enum EngineCommand {
    Upload(UploadFile),
    FetchResults(Vec<JobId>),
    StartPolling(Duration),
    StopPolling,
}

/// Owns the worker thread that runs requests and the poll timer.
///
/// Dropping the handle closes the command channel; the worker then drops its
/// poller, which cancels the timer.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn DashboardApi>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    dashboard_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut poller: Option<Poller> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartPolling(period) => {
                        if poller.as_ref().is_some_and(|p| !p.is_stopped()) {
                            dashboard_debug!("Poller already running; start ignored");
                            continue;
                        }
                        poller = Some(Poller::start(runtime.handle(), period, sink.clone()));
                    }
                    EngineCommand::StopPolling => {
                        if poller.take().is_some() {
                            dashboard_info!("Poller stopped");
                        }
                    }
                    command => {
                        let api = api.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            handle_request(api.as_ref(), command, sink.as_ref()).await;
                        });
                    }
                }
            }
            drop(poller);
            dashboard_debug!("Engine command channel closed");
        });

        Self { cmd_tx }
    }

    pub fn upload(&self, file: UploadFile) {
        let _ = self.cmd_tx.send(EngineCommand::Upload(file));
    }

    pub fn fetch_results(&self, job_ids: Vec<JobId>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchResults(job_ids));
    }

    pub fn start_polling(&self, period: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling(period));
    }

    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling);
    }
}

async fn handle_request(api: &dyn DashboardApi, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Upload(file) => {
            let result = api.upload(&file).await;
            sink.emit(EngineEvent::UploadCompleted(result));
        }
        EngineCommand::FetchResults(job_ids) => {
            let result = api.fetch_results(&job_ids).await;
            sink.emit(EngineEvent::ResultsFetched { job_ids, result });
        }
        EngineCommand::StartPolling(_) | EngineCommand::StopPolling => {}
    }
}
