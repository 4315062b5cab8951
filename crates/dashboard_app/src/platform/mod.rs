mod app;
mod config;
mod effects;
mod file_input;
mod logging;
mod ui;

pub use app::run_app;
pub use config::Args;
