use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use swarna_core::{AlgorithmMode, RequestSeq};
use swarna_logging::swarna_debug;

use crate::client::SearchBackend;
use crate::EngineEvent;

enum EngineCommand {
    Search {
        seq: RequestSeq,
        query: String,
        mode: AlgorithmMode,
    },
    Evaluate {
        seq: RequestSeq,
        query: String,
    },
}

/// Runs remote calls on a background tokio runtime.
///
/// Requests are never cancelled; every command produces exactly one event,
/// in completion order. Ordering against newer requests is the caller's job.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn spawn(backend: Arc<dyn SearchBackend>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("swarna-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let backend = backend.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(backend.as_ref(), command, event_tx).await;
                    });
                }
                swarna_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn search(&self, seq: RequestSeq, query: impl Into<String>, mode: AlgorithmMode) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            seq,
            query: query.into(),
            mode,
        });
    }

    pub fn evaluate(&self, seq: RequestSeq, query: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Evaluate {
            seq,
            query: query.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    backend: &dyn SearchBackend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Search { seq, query, mode } => EngineEvent::SearchCompleted {
            seq,
            result: backend.search(&query, mode).await,
        },
        EngineCommand::Evaluate { seq, query } => EngineEvent::EvaluationCompleted {
            seq,
            result: backend.evaluate(&query).await,
        },
    };
    let _ = event_tx.send(event);
}
