use swarna_logging::{swarna_debug, swarna_warn};

use crate::fallback::filter_fallback;
use crate::normalize::normalize_hits;
use crate::{pager, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QuerySubmitted(raw) => {
            let query = raw.trim();
            if query.is_empty() {
                return (state, Vec::new());
            }
            let query = query.to_owned();
            let seq = state.begin_search(query.clone());
            vec![
                Effect::IssueSearch {
                    seq,
                    query,
                    mode: state.session().active_mode,
                },
                Effect::PersistSession,
            ]
        }
        Msg::ModeSwitched(mode) => {
            state.set_mode(mode);
            let query = state.session().query.clone();
            if query.is_empty() {
                vec![Effect::PersistSession]
            } else {
                // Every switch is a fresh round trip; scores are never re-ranked locally.
                let seq = state.begin_search(query.clone());
                vec![
                    Effect::IssueSearch { seq, query, mode },
                    Effect::PersistSession,
                ]
            }
        }
        Msg::SearchSucceeded { seq, response } => {
            if !state.is_current_search(seq) {
                swarna_debug!("Ignoring stale search response #{}", seq);
                return (state, Vec::new());
            }
            let records = normalize_hits(response.results);
            state.apply_results(records, false);
            vec![Effect::PersistSession]
        }
        Msg::SearchFailed { seq, reason } => {
            if !state.is_current_search(seq) {
                swarna_debug!("Ignoring stale search failure #{}", seq);
                return (state, Vec::new());
            }
            swarna_warn!(
                "Search #{} failed ({}); answering from the bundled dataset",
                seq,
                reason
            );
            let records = filter_fallback(&state.session().query);
            state.apply_results(records, true);
            vec![Effect::PersistSession]
        }
        Msg::NextPage => {
            let session = state.session();
            let next = pager::next_index(session.page_index, session.results.len());
            if state.set_page(next) {
                vec![Effect::PersistSession]
            } else {
                Vec::new()
            }
        }
        Msg::PrevPage => {
            let prev = pager::prev_index(state.session().page_index);
            if state.set_page(prev) {
                vec![Effect::PersistSession]
            } else {
                Vec::new()
            }
        }
        Msg::ResultSelected { id } => match state.find_record(&id) {
            Some(record) => vec![Effect::ArmRestore, Effect::NavigateToDetail(record.clone())],
            None => Vec::new(),
        },
        Msg::EvaluationOpened => {
            if state.session().query.is_empty() {
                return (state, Vec::new());
            }
            let seq = state.open_evaluation();
            vec![Effect::IssueEvaluation {
                seq,
                query: state.session().query.clone(),
            }]
        }
        Msg::EvaluationSucceeded { seq, report } => {
            if !state.finish_evaluation(seq, Ok(report)) {
                swarna_debug!("Ignoring evaluation #{} for a closed or newer panel", seq);
            }
            Vec::new()
        }
        Msg::EvaluationFailed { seq, reason } => {
            if !state.finish_evaluation(seq, Err(reason)) {
                swarna_debug!("Ignoring evaluation failure #{}", seq);
            }
            Vec::new()
        }
        Msg::EvaluationClosed => {
            state.close_evaluation();
            Vec::new()
        }
        Msg::SessionReset => {
            state.reset_session();
            vec![Effect::ClearSession]
        }
    };

    (state, effects)
}
