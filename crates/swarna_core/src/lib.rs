//! Swarna core: pure search-session state machine, result normalization,
//! paging and tab-scoped session persistence.
mod controller;
mod effect;
mod evaluation;
mod fallback;
mod mode;
mod msg;
mod normalize;
mod pager;
mod record;
mod session_store;
mod state;
mod update;
mod view_model;

pub use controller::QueryController;
pub use effect::Effect;
pub use evaluation::{
    format_metric, format_runtime, EvaluationReport, EvaluationView, Metrics, Runtimes,
};
pub use fallback::{fallback_dataset, filter_fallback};
pub use mode::{AlgorithmMode, UnknownMode};
pub use msg::Msg;
pub use normalize::{normalize_documents, normalize_hits, RawDocument, RemoteHit, SearchResponse};
pub use pager::{clamp_index, next_index, page, page_count, prev_index, PAGE_SIZE};
pub use record::SearchRecord;
pub use session_store::{keys, MemoryTabStorage, SessionStore, StorageError, TabStorage};
pub use state::{AppState, IssuedSeqs, RequestSeq, SearchPhase, SessionState};
pub use update::update;
pub use view_model::{
    format_category, score_percent, AppViewModel, DetailView, EvaluationPanel, MetricRow,
    ResultCardView, ScoreBar,
};
