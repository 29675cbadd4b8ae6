use std::sync::Once;

use pretty_assertions::assert_eq;
use serde_json::json;
use swarna_core::{
    update, AlgorithmMode, AppState, Effect, Msg, RequestSeq, SearchPhase, SearchResponse,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(swarna_logging::initialize_for_tests);
}

fn response(titles: &[&str]) -> SearchResponse {
    let results: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "document": { "no": i + 1, "judul": title, "deskripsi": format!("{title} desc"), "kategori": "tarian" },
                "tfidf_score": 0.5,
                "jaccard_score": 0.25
            })
        })
        .collect();
    serde_json::from_value(json!({ "results": results })).expect("valid response")
}

fn issued_seq(effects: &[Effect]) -> RequestSeq {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::IssueSearch { seq, .. } => Some(*seq),
            _ => None,
        })
        .expect("search issued")
}

fn searched(query: &str, titles: &[&str]) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::QuerySubmitted(query.to_string()));
    let seq = issued_seq(&effects);
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            seq,
            response: response(titles),
        },
    );
    state
}

#[test]
fn submit_trims_and_issues_one_search() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::QuerySubmitted("  angklung \n".into()));

    assert_eq!(
        effects,
        vec![
            Effect::IssueSearch {
                seq: 1,
                query: "angklung".to_string(),
                mode: AlgorithmMode::Combined,
            },
            Effect::PersistSession,
        ]
    );
    assert_eq!(state.phase(), SearchPhase::Searching);
    assert_eq!(state.session().query, "angklung");
    assert_eq!(state.session().page_index, 0);
    assert!(state.consume_dirty());
}

#[test]
fn blank_submit_is_ignored() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::QuerySubmitted("   \n\t".into()));

    assert!(effects.is_empty());
    assert_eq!(state.phase(), SearchPhase::Idle);
    assert!(!state.consume_dirty());
}

#[test]
fn successful_search_fills_results() {
    init_logging();
    let state = searched("angklung", &["Angklung", "Angklung Padaeng"]);
    let view = state.view();

    assert_eq!(state.phase(), SearchPhase::Results);
    assert!(view.has_searched);
    assert_eq!(view.page_index, 0);
    assert_eq!(view.page_count, 1);
    assert_eq!(view.total_results, 2);
    assert!(!view.offline);
    assert_eq!(view.cards[0].title, "Angklung");
    assert_eq!(view.cards[0].category_label, "TARIAN");
}

#[test]
fn empty_response_is_empty_phase() {
    init_logging();
    let state = searched("zzz", &[]);

    assert_eq!(state.phase(), SearchPhase::Empty);
    assert!(state.session().has_searched);
    assert_eq!(state.view().page_count, 1);
    assert!(state.view().cards.is_empty());
}

#[test]
fn mode_switch_refetches_and_resets_page() {
    init_logging();
    let titles: Vec<String> = (0..9).map(|i| format!("Angklung {i}")).collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let state = searched("angklung", &titles);
    let (state, _) = update(state, Msg::NextPage);
    assert_eq!(state.session().page_index, 1);

    let (state, effects) = update(state, Msg::ModeSwitched(AlgorithmMode::Jaccard));

    let searches: Vec<_> = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::IssueSearch { .. }))
        .collect();
    assert_eq!(
        searches,
        vec![&Effect::IssueSearch {
            seq: 2,
            query: "angklung".to_string(),
            mode: AlgorithmMode::Jaccard,
        }]
    );
    assert!(effects.contains(&Effect::PersistSession));
    assert_eq!(state.session().page_index, 0);
    assert_eq!(state.session().active_mode, AlgorithmMode::Jaccard);
    assert_eq!(state.phase(), SearchPhase::Searching);
}

#[test]
fn mode_switch_without_query_only_records_mode() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ModeSwitched(AlgorithmMode::Tfidf));

    assert_eq!(effects, vec![Effect::PersistSession]);
    assert_eq!(state.session().active_mode, AlgorithmMode::Tfidf);
    assert_eq!(state.phase(), SearchPhase::Idle);
}

#[test]
fn stale_response_is_discarded() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::QuerySubmitted("tari".into()));
    let (state, second) = update(state, Msg::QuerySubmitted("batik".into()));
    let (first, second) = (issued_seq(&first), issued_seq(&second));
    assert!(second > first);

    // The newer request resolves first.
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            seq: second,
            response: response(&["Batik"]),
        },
    );
    let (state, effects) = update(
        state,
        Msg::SearchSucceeded {
            seq: first,
            response: response(&["Tari Saman", "Tari Kecak"]),
        },
    );

    assert!(effects.is_empty());
    let titles: Vec<_> = state.session().results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Batik"]);
}

#[test]
fn stale_failure_does_not_degrade() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::QuerySubmitted("tari".into()));
    let (state, second) = update(state, Msg::QuerySubmitted("batik".into()));
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            seq: issued_seq(&second),
            response: response(&["Batik"]),
        },
    );
    let (state, effects) = update(
        state,
        Msg::SearchFailed {
            seq: issued_seq(&first),
            reason: "network error".into(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), SearchPhase::Results);
}

#[test]
fn transport_failure_answers_from_fallback_dataset() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::QuerySubmitted("batik".into()));
    let (state, effects) = update(
        state,
        Msg::SearchFailed {
            seq: issued_seq(&effects),
            reason: "network error".into(),
        },
    );

    assert_eq!(effects, vec![Effect::PersistSession]);
    assert_eq!(state.phase(), SearchPhase::Degraded);
    assert!(state.session().has_searched);
    assert!(state.view().offline);
    assert!(state.session().results.iter().any(|r| r.title == "Batik"));
}

#[test]
fn fallback_without_matches_still_marks_searched() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::QuerySubmitted("qwertyuiop".into()));
    let (state, _) = update(
        state,
        Msg::SearchFailed {
            seq: issued_seq(&effects),
            reason: "timeout".into(),
        },
    );

    assert_eq!(state.phase(), SearchPhase::Degraded);
    assert!(state.session().has_searched);
    assert!(state.session().results.is_empty());
}

#[test]
fn selecting_a_card_arms_restore_and_navigates() {
    init_logging();
    let state = searched("angklung", &["Angklung", "Calung"]);

    let (state, effects) = update(state, Msg::ResultSelected { id: "2".into() });

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::ArmRestore);
    match &effects[1] {
        Effect::NavigateToDetail(record) => assert_eq!(record.title, "Calung"),
        other => panic!("unexpected effect {other:?}"),
    }

    let (_state, effects) = update(state, Msg::ResultSelected { id: "99".into() });
    assert!(effects.is_empty());
}

#[test]
fn reset_clears_session() {
    init_logging();
    let state = searched("angklung", &["Angklung"]);

    let (state, effects) = update(state, Msg::SessionReset);

    assert_eq!(effects, vec![Effect::ClearSession]);
    assert_eq!(state.phase(), SearchPhase::Idle);
    assert!(state.session().results.is_empty());
    assert!(state.session().query.is_empty());
}

#[test]
fn score_rows_follow_active_mode() {
    init_logging();
    let state = searched("angklung", &["Angklung"]);
    let labels = |state: &AppState| -> Vec<&'static str> {
        state.view().cards[0].scores.iter().map(|bar| bar.label).collect()
    };
    assert_eq!(labels(&state), vec!["TF-IDF", "Jaccard"]);

    let (state, effects) = update(state, Msg::ModeSwitched(AlgorithmMode::Tfidf));
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            seq: issued_seq(&effects),
            response: response(&["Angklung"]),
        },
    );
    assert_eq!(labels(&state), vec!["TF-IDF"]);
}
