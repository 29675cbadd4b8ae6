use swarna_logging::{swarna_error, swarna_info};

use crate::session_store::{SessionStore, TabStorage};
use crate::view_model::AppViewModel;
use crate::{update, AlgorithmMode, AppState, Effect, Msg};

/// Owns the search session and its tab storage.
///
/// Messages go through [`update`]; storage effects are carried out here and
/// only network and navigation effects are handed back to the caller.
#[derive(Debug)]
pub struct QueryController<S: TabStorage> {
    state: AppState,
    store: SessionStore<S>,
}

impl<S: TabStorage> QueryController<S> {
    /// Mounts the search page. The persisted session is rehydrated only when
    /// the restore flag was armed by a navigation to a detail view. Request
    /// numbering always continues from what the tab has issued before.
    pub fn mount(storage: S) -> Self {
        let mut store = SessionStore::new(storage);
        let mut state = if store.consume_restore_flag() {
            let session = store.load();
            swarna_info!(
                "Restored session query={:?} results={} page={}",
                session.query,
                session.results.len(),
                session.page_index
            );
            AppState::restored(session)
        } else {
            AppState::new()
        };
        state.resume_numbering(store.load_issued());
        Self { state, store }
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let issued_before = self.state.issued();
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let issued = self.state.issued();
        if issued != issued_before {
            if let Err(err) = self.store.save_issued(issued) {
                swarna_error!("Failed to record request numbering: {}", err);
            }
        }

        let mut external = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::PersistSession => {
                    if let Err(err) = self.store.save(self.state.session()) {
                        swarna_error!("Failed to persist session: {}", err);
                    }
                }
                Effect::ArmRestore => {
                    if let Err(err) = self.store.arm_restore() {
                        swarna_error!("Failed to arm restore flag: {}", err);
                    }
                }
                Effect::ClearSession => {
                    if let Err(err) = self.store.clear() {
                        swarna_error!("Failed to clear session: {}", err);
                    }
                }
                other => external.push(other),
            }
        }
        external
    }

    pub fn submit(&mut self, query: &str) -> Vec<Effect> {
        self.dispatch(Msg::QuerySubmitted(query.to_string()))
    }

    pub fn switch_mode(&mut self, mode: AlgorithmMode) -> Vec<Effect> {
        self.dispatch(Msg::ModeSwitched(mode))
    }

    pub fn next_page(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::NextPage)
    }

    pub fn prev_page(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::PrevPage)
    }

    pub fn select(&mut self, id: &str) -> Vec<Effect> {
        self.dispatch(Msg::ResultSelected { id: id.to_string() })
    }

    pub fn open_evaluation(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::EvaluationOpened)
    }

    pub fn close_evaluation(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::EvaluationClosed)
    }

    pub fn reset(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::SessionReset)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// Unmounts the page, handing the tab storage back to the caller.
    pub fn unmount(self) -> S {
        self.store.into_storage()
    }
}
