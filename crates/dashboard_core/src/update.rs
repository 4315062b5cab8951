use crate::{AppState, Effect, Msg, Phase, POLL_INTERVAL};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(file) => {
            state.select_file(Some(file));
            Vec::new()
        }
        Msg::FileCleared => {
            state.select_file(None);
            Vec::new()
        }
        Msg::UploadSubmitted => {
            // The submit control is disabled while loading.
            if state.phase().is_loading() {
                return (state, Vec::new());
            }
            let Some(file) = state.selected().cloned() else {
                return (state, Vec::new());
            };
            state.begin_upload();
            vec![Effect::Upload { file }]
        }
        Msg::UploadSucceeded(jobs) => {
            if state.phase() != Phase::Uploading {
                return (state, Vec::new());
            }
            state.apply_jobs(jobs);
            if state.outstanding().is_empty() {
                state.set_phase(Phase::Done);
                Vec::new()
            } else {
                state.set_phase(Phase::Polling);
                vec![Effect::StartPolling {
                    interval: POLL_INTERVAL,
                }]
            }
        }
        Msg::UploadFailed(_reason) => {
            if state.phase() == Phase::Uploading {
                state.set_phase(Phase::Failed);
            }
            Vec::new()
        }
        Msg::PollTick => {
            if !state.is_polling() {
                return (state, Vec::new());
            }
            if state.outstanding().is_empty() {
                stop_polling(&mut state, Phase::Done)
            } else if state.is_fetch_in_flight() {
                Vec::new()
            } else {
                state.set_fetch_in_flight(true);
                vec![Effect::FetchResults {
                    job_ids: state.outstanding().ids().to_vec(),
                }]
            }
        }
        Msg::ResultsArrived(batch) => {
            state.set_fetch_in_flight(false);
            state.merge_results(batch);
            if state.is_polling() && state.outstanding().is_empty() {
                stop_polling(&mut state, Phase::Done)
            } else {
                Vec::new()
            }
        }
        Msg::PollFailed(_reason) => {
            state.set_fetch_in_flight(false);
            Vec::new()
        }
        Msg::Teardown => match state.phase() {
            Phase::Polling => stop_polling(&mut state, Phase::Stopped),
            Phase::Uploading => {
                state.set_phase(Phase::Stopped);
                Vec::new()
            }
            _ => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn stop_polling(state: &mut AppState, next: Phase) -> Vec<Effect> {
    state.set_phase(next);
    state.set_fetch_in_flight(false);
    vec![Effect::StopPolling]
}
