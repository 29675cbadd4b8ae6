use crate::{AlgorithmMode, EvaluationReport, RequestSeq, SearchResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the search box.
    QuerySubmitted(String),
    /// User picked an algorithm tab.
    ModeSwitched(AlgorithmMode),
    /// Service answered a search request.
    SearchSucceeded {
        seq: RequestSeq,
        response: SearchResponse,
    },
    /// Search request failed after the transport gave up retrying.
    SearchFailed { seq: RequestSeq, reason: String },
    NextPage,
    PrevPage,
    /// User opened the detail view of a result card.
    ResultSelected { id: String },
    /// User opened the evaluation panel for the current query.
    EvaluationOpened,
    EvaluationSucceeded {
        seq: RequestSeq,
        report: EvaluationReport,
    },
    EvaluationFailed { seq: RequestSeq, reason: String },
    EvaluationClosed,
    /// Explicitly forget the session, including its persisted copy.
    SessionReset,
}
