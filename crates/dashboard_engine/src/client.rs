use std::time::Duration;

use dashboard_logging::{dashboard_debug, dashboard_info};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{ClientError, JobId, ResultRecord, UploadFile, UploadedJob};

pub const UPLOAD_PATH: &str = "/keywords/upload";
pub const RESULTS_PATH: &str = "/keywords/results";

const UPLOAD_FIELD: &str = "file";
const CSV_MIME: &str = "text/csv";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The two backend endpoints the dashboard talks to.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn upload(&self, file: &UploadFile) -> Result<Vec<UploadedJob>, ClientError>;

    async fn fetch_results(&self, job_ids: &[JobId]) -> Result<Vec<ResultRecord>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDashboardClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestDashboardClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        // Fail early on a malformed base url.
        upload_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClientError::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClientError::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                });
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl DashboardApi for ReqwestDashboardClient {
    async fn upload(&self, file: &UploadFile) -> Result<Vec<UploadedJob>, ClientError> {
        let url = upload_url(&self.settings.base_url)?;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(CSV_MIME)
            .map_err(|err| ClientError::Network(err.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        dashboard_info!(
            "Uploading {} ({} bytes) to {}",
            file.file_name,
            file.bytes.len(),
            url
        );
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // Only a plain 200 counts as an accepted upload.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }
        self.read_json(response).await
    }

    async fn fetch_results(&self, job_ids: &[JobId]) -> Result<Vec<ResultRecord>, ClientError> {
        let url = results_url(&self.settings.base_url, job_ids)?;
        dashboard_debug!("Fetching results for {} job(s)", job_ids.len());
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }
        self.read_json(response).await
    }
}

pub fn upload_url(base_url: &str) -> Result<Url, ClientError> {
    endpoint(base_url, UPLOAD_PATH)
}

/// Results endpoint with `jobIds` set to the comma-joined ids, encoded as
/// one query value.
pub fn results_url(base_url: &str, job_ids: &[JobId]) -> Result<Url, ClientError> {
    let mut url = endpoint(base_url, RESULTS_PATH)?;
    url.query_pairs_mut()
        .append_pair("jobIds", &job_ids.join(","));
    Ok(url)
}

fn endpoint(base_url: &str, path: &str) -> Result<Url, ClientError> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), path);
    let url = Url::parse(&joined).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::InvalidUrl(format!("unsupported scheme {other}"))),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout(err.to_string());
    }
    ClientError::Network(err.to_string())
}
