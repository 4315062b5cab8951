use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use dashboard_engine::{
    ChannelEventSink, ClientError, DashboardApi, EngineEvent, EngineHandle, JobId, ResultRecord,
    UploadFile, UploadedJob,
};
use serde_json::Map;

const WAIT: Duration = Duration::from_secs(2);

#[derive(Default)]
struct FakeApi {
    uploads: Mutex<Vec<String>>,
    fetches: Mutex<Vec<Vec<JobId>>>,
    fail_fetch: bool,
}

#[async_trait::async_trait]
impl DashboardApi for FakeApi {
    async fn upload(&self, file: &UploadFile) -> Result<Vec<UploadedJob>, ClientError> {
        self.uploads.lock().unwrap().push(file.file_name.clone());
        Ok(vec![UploadedJob {
            job_id: "a".to_string(),
            keyword: "rust".to_string(),
        }])
    }

    async fn fetch_results(&self, job_ids: &[JobId]) -> Result<Vec<ResultRecord>, ClientError> {
        self.fetches.lock().unwrap().push(job_ids.to_vec());
        if self.fail_fetch {
            return Err(ClientError::Network("connection refused".to_string()));
        }
        Ok(job_ids
            .iter()
            .map(|id| ResultRecord {
                job_id: id.clone(),
                fields: Map::new(),
            })
            .collect())
    }
}

fn engine_with(api: Arc<FakeApi>) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(api, Arc::new(ChannelEventSink::new(tx)));
    (engine, rx)
}

#[test]
fn upload_command_reports_completion() {
    let api = Arc::new(FakeApi::default());
    let (engine, rx) = engine_with(api.clone());

    engine.upload(UploadFile {
        file_name: "keywords.csv".to_string(),
        bytes: b"keyword\nrust\n".to_vec(),
    });

    let event = rx.recv_timeout(WAIT).expect("upload event");
    match event {
        EngineEvent::UploadCompleted(Ok(jobs)) => assert_eq!(jobs[0].job_id, "a"),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(*api.uploads.lock().unwrap(), vec!["keywords.csv".to_string()]);
}

#[test]
fn fetch_command_echoes_requested_ids() {
    let api = Arc::new(FakeApi::default());
    let (engine, rx) = engine_with(api);

    engine.fetch_results(vec!["a".to_string(), "b".to_string()]);

    match rx.recv_timeout(WAIT).expect("fetch event") {
        EngineEvent::ResultsFetched { job_ids, result } => {
            assert_eq!(job_ids, vec!["a".to_string(), "b".to_string()]);
            assert_eq!(result.expect("results").len(), 2);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn fetch_failure_is_reported_not_swallowed() {
    let api = Arc::new(FakeApi {
        fail_fetch: true,
        ..FakeApi::default()
    });
    let (engine, rx) = engine_with(api);

    engine.fetch_results(vec!["a".to_string()]);

    match rx.recv_timeout(WAIT).expect("fetch event") {
        EngineEvent::ResultsFetched { result, .. } => {
            assert_eq!(
                result,
                Err(ClientError::Network("connection refused".to_string()))
            );
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn polling_emits_ticks_until_stopped() {
    let api = Arc::new(FakeApi::default());
    let (engine, rx) = engine_with(api);

    engine.start_polling(Duration::from_millis(20));
    // A second start while running must not spawn another timer.
    engine.start_polling(Duration::from_millis(20));

    assert_eq!(rx.recv_timeout(WAIT), Ok(EngineEvent::PollTick));
    assert_eq!(rx.recv_timeout(WAIT), Ok(EngineEvent::PollTick));

    engine.stop_polling();
    std::thread::sleep(Duration::from_millis(60));
    while rx.try_recv().is_ok() {}
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn dropping_the_engine_stops_the_timer() {
    let api = Arc::new(FakeApi::default());
    let (engine, rx) = engine_with(api);

    engine.start_polling(Duration::from_millis(20));
    assert_eq!(rx.recv_timeout(WAIT), Ok(EngineEvent::PollTick));

    drop(engine);
    std::thread::sleep(Duration::from_millis(60));
    while rx.try_recv().is_ok() {}
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}
