use dashboard_core::JobResult;
use serde_json::Value;

/// Renders one accumulated result. The dashboard treats this as a
/// black box and only decides where the output goes.
pub trait ResultRenderer {
    fn render(&self, result: &JobResult) -> Vec<String>;
}

/// Shows the job id followed by every payload field on its own line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultItem;

impl ResultRenderer for ResultItem {
    fn render(&self, result: &JobResult) -> Vec<String> {
        let mut lines = Vec::with_capacity(result.payload.len() + 1);
        lines.push(format!("* {}", result.job_id));
        for (key, value) in &result.payload {
            lines.push(format!("    {key}: {}", format_value(value)));
        }
        lines
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
