use dashboard_core::AppViewModel;

use super::result_item::ResultRenderer;

pub const NAV_LABEL: &str = "Search Reports";
pub const NAV_TARGET: &str = "/search-report";
pub const LOADING_TEXT: &str = "Loading...";

#[allow(clippy::vec_init_then_push)]
pub fn render(view: &AppViewModel, results: &dyn ResultRenderer) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("[{NAV_LABEL}] -> {NAV_TARGET}"));
    lines.push(String::new());

    let file_text = match &view.selected_file {
        Some(name) => name.as_str(),
        None => "(no .csv selected)",
    };
    lines.push(format!("CSV file: {file_text}"));
    lines.push(if view.submit_enabled {
        "[ Upload CSV ]".to_string()
    } else {
        "[ Upload CSV ] (disabled)".to_string()
    });
    lines.push(String::new());

    lines.push("Uploaded Keywords".to_string());
    for keyword in &view.keywords {
        lines.push(format!("  - {keyword}"));
    }
    lines.push(String::new());

    for result in &view.results {
        lines.extend(results.render(result));
    }

    if view.loading {
        lines.push(LOADING_TEXT.to_string());
    }

    lines
}
