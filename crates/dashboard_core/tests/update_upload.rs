use std::sync::Once;

use dashboard_core::{
    update, AppState, Effect, Job, JobResult, Msg, Phase, SelectedFile, POLL_INTERVAL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn csv() -> SelectedFile {
    SelectedFile::new("keywords.csv", b"keyword\nx\ny\n".to_vec())
}

fn select_and_submit(state: AppState, file: SelectedFile) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::FileSelected(file));
    update(state, Msg::UploadSubmitted)
}

#[test]
fn submit_without_file_is_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::UploadSubmitted);

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn submit_emits_exactly_one_upload_with_the_file() {
    init_logging();
    let (mut state, effects) = select_and_submit(AppState::new(), csv());

    assert_eq!(effects, vec![Effect::Upload { file: csv() }]);
    let view = state.view();
    assert_eq!(view.phase, Phase::Uploading);
    assert!(view.loading);
    assert!(!view.submit_enabled);
    assert_eq!(view.selected_file.as_deref(), Some("keywords.csv"));
    assert_eq!(view.uploads, 1);
    assert!(state.consume_dirty());
}

#[test]
fn submit_while_loading_is_ignored() {
    init_logging();
    let (state, _) = select_and_submit(AppState::new(), csv());
    let (next, effects) = update(state.clone(), Msg::UploadSubmitted);

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn upload_success_tracks_jobs_and_starts_polling() {
    init_logging();
    let (state, _) = select_and_submit(AppState::new(), csv());
    let (state, effects) = update(
        state,
        Msg::UploadSucceeded(vec![Job::new("a", "x"), Job::new("b", "y")]),
    );

    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            interval: POLL_INTERVAL
        }]
    );
    let view = state.view();
    assert_eq!(view.keywords, vec!["x".to_string(), "y".to_string()]);
    assert_eq!(view.outstanding, vec!["a".to_string(), "b".to_string()]);
    assert!(view.polling);
    assert!(view.loading);
}

#[test]
fn upload_with_no_jobs_settles_without_polling() {
    init_logging();
    let (state, _) = select_and_submit(AppState::new(), csv());
    let (state, effects) = update(state, Msg::UploadSucceeded(Vec::new()));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Done);
    assert!(!view.loading);
    assert!(view.keywords.is_empty());
    assert!(view.is_settled());
}

#[test]
fn upload_failure_keeps_job_state_and_allows_resubmit() {
    init_logging();
    let (state, _) = select_and_submit(AppState::new(), csv());
    let (state, effects) = update(state, Msg::UploadFailed("http status 500".into()));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Failed);
    assert!(!view.loading);
    assert!(view.submit_enabled);
    assert!(view.keywords.is_empty());
    assert!(view.outstanding.is_empty());

    // The selection survives, so the user can simply submit again.
    let (_state, effects) = update(state, Msg::UploadSubmitted);
    assert_eq!(effects, vec![Effect::Upload { file: csv() }]);
}

#[test]
fn late_upload_response_after_teardown_is_ignored() {
    init_logging();
    let (state, _) = select_and_submit(AppState::new(), csv());
    let (state, _) = update(state, Msg::Teardown);
    let (state, effects) = update(state, Msg::UploadSucceeded(vec![Job::new("a", "x")]));

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Stopped);
    assert!(state.outstanding().is_empty());
}

// Results are cumulative across uploads; a second upload does not clear them.
#[test]
fn second_upload_keeps_previous_results() {
    init_logging();
    let (state, _) = select_and_submit(AppState::new(), csv());
    let (state, _) = update(state, Msg::UploadSucceeded(vec![Job::new("a", "x")]));
    let (state, _) = update(state, Msg::PollTick);
    let (state, _) = update(
        state,
        Msg::ResultsArrived(vec![JobResult::new("a").with_field("rank", 1)]),
    );
    assert_eq!(state.phase(), Phase::Done);

    let other = SelectedFile::new("more.csv", b"keyword\nz\n".to_vec());
    let (state, effects) = select_and_submit(state, other.clone());
    assert_eq!(effects, vec![Effect::Upload { file: other }]);

    let (state, _) = update(state, Msg::UploadSucceeded(vec![Job::new("c", "z")]));
    let view = state.view();
    assert_eq!(view.keywords, vec!["z".to_string()]);
    assert_eq!(view.outstanding, vec!["c".to_string()]);
    assert_eq!(view.results.len(), 1);
    assert_eq!(view.results[0].job_id, "a");
    assert_eq!(view.uploads, 2);
}

#[test]
fn duplicate_job_ids_collapse_but_keywords_do_not() {
    init_logging();
    let (state, _) = select_and_submit(AppState::new(), csv());
    let (state, _) = update(
        state,
        Msg::UploadSucceeded(vec![Job::new("a", "x"), Job::new("a", "x")]),
    );

    assert_eq!(state.outstanding().len(), 1);
    assert_eq!(state.keywords().len(), 2);
}

#[test]
fn clearing_the_file_disables_submission() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FileSelected(csv()));
    let (state, _) = update(state, Msg::FileCleared);
    let (state, effects) = update(state, Msg::UploadSubmitted);

    assert!(effects.is_empty());
    assert_eq!(state.view().selected_file, None);
    assert_eq!(state.phase(), Phase::Idle);
}
