use std::sync::Arc;

use swarna_core::{Effect, Msg, SearchRecord};
use swarna_engine::{EngineEvent, EngineHandle, SearchBackend};
use swarna_logging::{swarna_info, swarna_warn};

/// Carries out the effects the controller hands back and turns engine events
/// into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(backend: Arc<dyn SearchBackend>) -> std::io::Result<Self> {
        Ok(Self {
            engine: EngineHandle::spawn(backend)?,
        })
    }

    /// Starts remote work. Returns the record to show when one of the effects
    /// navigates away from the search page.
    pub fn run(&self, effects: Vec<Effect>) -> Option<SearchRecord> {
        let mut navigate_to = None;
        for effect in effects {
            match effect {
                Effect::IssueSearch { seq, query, mode } => {
                    swarna_info!("IssueSearch seq={} mode={} query={:?}", seq, mode, query);
                    self.engine.search(seq, query, mode);
                }
                Effect::IssueEvaluation { seq, query } => {
                    swarna_info!("IssueEvaluation seq={} query={:?}", seq, query);
                    self.engine.evaluate(seq, query);
                }
                Effect::NavigateToDetail(record) => navigate_to = Some(record),
                // The controller handles storage itself.
                Effect::PersistSession | Effect::ArmRestore | Effect::ClearSession => {}
            }
        }
        navigate_to
    }

    /// Completed engine work, oldest first.
    pub fn drain(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(event_to_msg)
            .collect()
    }
}

pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { seq, result } => match result {
            Ok(response) => Msg::SearchSucceeded { seq, response },
            Err(err) => {
                swarna_warn!("Search {} failed: {}", seq, err);
                Msg::SearchFailed {
                    seq,
                    reason: err.to_string(),
                }
            }
        },
        EngineEvent::EvaluationCompleted { seq, result } => match result {
            Ok(report) => Msg::EvaluationSucceeded { seq, report },
            Err(err) => {
                swarna_warn!("Evaluation {} failed: {}", seq, err);
                Msg::EvaluationFailed {
                    seq,
                    reason: err.to_string(),
                }
            }
        },
    }
}
