use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use dashboard_engine::ClientSettings;

use super::logging::LogDestination;

/// Upload a keyword CSV and follow its jobs until every result is in.
#[derive(Debug, Parser)]
#[command(name = "keyword-dashboard", version)]
pub struct Args {
    /// Backend root serving /keywords/upload and /keywords/results.
    #[arg(long, env = "DASHBOARD_BASE_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Where log output goes. The terminal itself shows the dashboard.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// CSV to upload right away. The app exits once its jobs settle.
    /// Without it, CSV paths are read from stdin, one per line.
    pub csv: Option<PathBuf>,
}

impl Args {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::default()
        }
    }
}
