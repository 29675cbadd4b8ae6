use crate::{AlgorithmMode, RequestSeq, SearchRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    IssueSearch {
        seq: RequestSeq,
        query: String,
        mode: AlgorithmMode,
    },
    IssueEvaluation { seq: RequestSeq, query: String },
    /// Write the session to tab storage.
    PersistSession,
    /// Arm the one-shot restore flag before leaving for a detail view.
    ArmRestore,
    /// Remove the persisted session.
    ClearSession,
    /// Show the detail view for this record; it is not re-fetched.
    NavigateToDetail(SearchRecord),
}
