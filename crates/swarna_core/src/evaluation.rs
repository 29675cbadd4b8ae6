use serde::Deserialize;

use crate::RequestSeq;

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Wall-clock seconds the service spent per algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Runtimes {
    pub tfidf: f64,
    pub jaccard: f64,
    pub hybrid: f64,
}

/// Body of `GET /evaluate`, flattened for the client.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "EvaluationPayload")]
pub struct EvaluationReport {
    pub query: String,
    pub top_k: Option<u32>,
    pub runtime: Runtimes,
    pub tfidf: Metrics,
    pub jaccard: Metrics,
    pub hybrid: Metrics,
    pub relevant_count: u64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct EvaluationPayload {
    query: String,
    top_k: Option<u32>,
    runtime: Runtimes,
    tfidf: Metrics,
    jaccard: Metrics,
    hybrid: Metrics,
    counts: Counts,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Counts {
    relevant_count: u64,
}

impl From<EvaluationPayload> for EvaluationReport {
    fn from(payload: EvaluationPayload) -> Self {
        Self {
            query: payload.query,
            top_k: payload.top_k,
            runtime: payload.runtime,
            tfidf: payload.tfidf,
            jaccard: payload.jaccard,
            hybrid: payload.hybrid,
            relevant_count: payload.counts.relevant_count,
        }
    }
}

/// Lifecycle of the evaluation panel. Nothing is cached between openings.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EvaluationView {
    #[default]
    Closed,
    Loading {
        seq: RequestSeq,
        query: String,
    },
    Loaded(EvaluationReport),
    Failed {
        query: String,
        reason: String,
    },
}

impl EvaluationView {
    pub fn is_open(&self) -> bool {
        !matches!(self, EvaluationView::Closed)
    }
}

/// Precision, recall and F1 are shown with 8 decimals.
pub fn format_metric(value: f64) -> String {
    format!("{value:.8}")
}

/// Runtimes are shown in seconds with 4 decimals.
pub fn format_runtime(seconds: f64) -> String {
    format!("{seconds:.4}")
}
