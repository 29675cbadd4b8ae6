//! Swarna engine: remote search/evaluation transport and tab storage IO.
mod client;
mod engine;
mod retry;
mod storage;
mod types;

pub use client::{ClientSettings, ReqwestSearchClient, SearchBackend};
pub use engine::EngineHandle;
pub use retry::RetryPolicy;
pub use storage::FileTabStorage;
pub use types::{EngineEvent, FailureKind, FetchError};
