use crate::evaluation::EvaluationView;
use crate::pager;
use crate::view_model::AppViewModel;
use crate::{AlgorithmMode, EvaluationReport, SearchRecord};

/// Monotonically increasing id of an issued request, one counter per
/// logical operation.
pub type RequestSeq = u64;

/// Highest sequence numbers issued so far in the tab. They survive remounts so
/// an answer to a request from before a detail round trip never matches a
/// newer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssuedSeqs {
    pub search: RequestSeq,
    pub evaluation: RequestSeq,
}

/// The persisted part of a search session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub query: String,
    pub active_mode: AlgorithmMode,
    pub results: Vec<SearchRecord>,
    pub has_searched: bool,
    pub page_index: usize,
}

impl SessionState {
    pub fn page_count(&self) -> usize {
        pager::page_count(self.results.len())
    }

    pub fn current_page(&self) -> &[SearchRecord] {
        pager::page(&self.results, self.page_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Results,
    Empty,
    /// Results came from the bundled dataset because the service was unreachable.
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: SessionState,
    phase: SearchPhase,
    last_search_seq: RequestSeq,
    evaluation: EvaluationView,
    last_evaluation_seq: RequestSeq,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State rehydrated after returning from a detail view.
    pub fn restored(mut session: SessionState) -> Self {
        session.page_index = pager::clamp_index(session.page_index, session.results.len());
        let phase = match (session.has_searched, session.results.is_empty()) {
            (false, _) => SearchPhase::Idle,
            (true, true) => SearchPhase::Empty,
            (true, false) => SearchPhase::Results,
        };
        Self {
            session,
            phase,
            dirty: true,
            ..Self::default()
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn evaluation(&self) -> &EvaluationView {
        &self.evaluation
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(&self.session, self.phase, &self.evaluation, self.dirty)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn find_record(&self, id: &str) -> Option<&SearchRecord> {
        self.session.results.iter().find(|record| record.id == id)
    }

    pub fn issued(&self) -> IssuedSeqs {
        IssuedSeqs {
            search: self.last_search_seq,
            evaluation: self.last_evaluation_seq,
        }
    }

    /// Continues numbering after `issued`; counters never move backwards.
    pub(crate) fn resume_numbering(&mut self, issued: IssuedSeqs) {
        self.last_search_seq = self.last_search_seq.max(issued.search);
        self.last_evaluation_seq = self.last_evaluation_seq.max(issued.evaluation);
    }

    pub(crate) fn begin_search(&mut self, query: String) -> RequestSeq {
        self.last_search_seq += 1;
        self.session.query = query;
        self.session.page_index = 0;
        self.phase = SearchPhase::Searching;
        self.dirty = true;
        self.last_search_seq
    }

    pub(crate) fn is_current_search(&self, seq: RequestSeq) -> bool {
        seq == self.last_search_seq && self.phase == SearchPhase::Searching
    }

    pub(crate) fn set_mode(&mut self, mode: AlgorithmMode) {
        self.session.active_mode = mode;
        self.dirty = true;
    }

    pub(crate) fn apply_results(&mut self, results: Vec<SearchRecord>, degraded: bool) {
        self.phase = match (degraded, results.is_empty()) {
            (true, _) => SearchPhase::Degraded,
            (false, true) => SearchPhase::Empty,
            (false, false) => SearchPhase::Results,
        };
        self.session.results = results;
        self.session.has_searched = true;
        self.session.page_index = 0;
        self.dirty = true;
    }

    /// Moves to `index` if it differs from the current page.
    pub(crate) fn set_page(&mut self, index: usize) -> bool {
        if index == self.session.page_index {
            return false;
        }
        self.session.page_index = index;
        self.dirty = true;
        true
    }

    pub(crate) fn open_evaluation(&mut self) -> RequestSeq {
        self.last_evaluation_seq += 1;
        self.evaluation = EvaluationView::Loading {
            seq: self.last_evaluation_seq,
            query: self.session.query.clone(),
        };
        self.dirty = true;
        self.last_evaluation_seq
    }

    /// Applies an evaluation outcome if it answers the request currently shown.
    pub(crate) fn finish_evaluation(
        &mut self,
        seq: RequestSeq,
        outcome: Result<EvaluationReport, String>,
    ) -> bool {
        let query = match &self.evaluation {
            EvaluationView::Loading { seq: awaited, query } if *awaited == seq => query.clone(),
            _ => return false,
        };
        self.evaluation = match outcome {
            Ok(report) => EvaluationView::Loaded(report),
            Err(reason) => EvaluationView::Failed { query, reason },
        };
        self.dirty = true;
        true
    }

    pub(crate) fn close_evaluation(&mut self) {
        if self.evaluation.is_open() {
            self.evaluation = EvaluationView::Closed;
            self.dirty = true;
        }
    }

    pub(crate) fn reset_session(&mut self) {
        self.session = SessionState::default();
        self.phase = SearchPhase::Idle;
        self.dirty = true;
    }
}
