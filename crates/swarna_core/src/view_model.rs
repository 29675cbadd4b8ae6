use crate::evaluation::{format_metric, format_runtime, EvaluationView, Metrics};
use crate::{AlgorithmMode, SearchPhase, SearchRecord, SessionState};

const USAGE_NOTE_CATEGORY: &str = "alat_musik";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub query: String,
    pub active_mode: AlgorithmMode,
    pub phase: SearchPhase,
    pub has_searched: bool,
    pub total_results: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub cards: Vec<ResultCardView>,
    /// Results were answered from the bundled dataset.
    pub offline: bool,
    pub evaluation: EvaluationPanel,
    pub dirty: bool,
}

impl AppViewModel {
    pub(crate) fn build(
        session: &SessionState,
        phase: SearchPhase,
        evaluation: &EvaluationView,
        dirty: bool,
    ) -> Self {
        let mode = session.active_mode;
        Self {
            query: session.query.clone(),
            active_mode: mode,
            phase,
            has_searched: session.has_searched,
            total_results: session.results.len(),
            page_index: session.page_index,
            page_count: session.page_count(),
            cards: session
                .current_page()
                .iter()
                .map(|record| ResultCardView::from_record(record, mode))
                .collect(),
            offline: phase == SearchPhase::Degraded,
            evaluation: EvaluationPanel::from_view(evaluation),
            dirty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category_label: String,
    pub image_url: String,
    pub scores: Vec<ScoreBar>,
}

impl ResultCardView {
    fn from_record(record: &SearchRecord, mode: AlgorithmMode) -> Self {
        let mut scores = Vec::with_capacity(2);
        if mode.shows_tfidf() {
            scores.push(ScoreBar::new("TF-IDF", record.score_tfidf));
        }
        if mode.shows_jaccard() {
            scores.push(ScoreBar::new("Jaccard", record.score_jaccard));
        }
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            category_label: format_category(&record.category),
            image_url: record.image_url.clone(),
            scores,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    pub label: &'static str,
    pub raw: f64,
    /// Bar fill in percent, always within `0.0..=100.0`.
    pub percent: f64,
}

impl ScoreBar {
    pub fn new(label: &'static str, raw: f64) -> Self {
        Self {
            label,
            raw,
            percent: score_percent(raw),
        }
    }
}

/// Converts a score to a bar fill, capped at 100% and floored at 0%.
pub fn score_percent(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    (score * 100.0).clamp(0.0, 100.0)
}

/// `alat_musik` -> `ALAT MUSIK`.
pub fn format_category(category: &str) -> String {
    category.replace('_', " ").to_uppercase()
}

/// Everything the detail view shows, read straight from the selected record.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub category_label: String,
    pub origin_region: Option<String>,
    /// Only musical instruments carry a playing technique.
    pub usage_note: Option<String>,
    pub description: String,
    pub image_url: String,
    pub external_link: Option<String>,
    pub scores: [ScoreBar; 2],
}

impl DetailView {
    pub fn from_record(record: &SearchRecord) -> Self {
        let usage_note = record
            .usage_note
            .clone()
            .filter(|_| record.category.eq_ignore_ascii_case(USAGE_NOTE_CATEGORY));
        Self {
            title: record.title.clone(),
            category_label: format_category(&record.category),
            origin_region: record.origin_region.clone(),
            usage_note,
            description: record.description.clone(),
            image_url: record.image_url.clone(),
            external_link: record.external_link.clone(),
            scores: [
                ScoreBar::new("TF-IDF", record.score_tfidf),
                ScoreBar::new("Jaccard", record.score_jaccard),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EvaluationPanel {
    #[default]
    Hidden,
    Loading {
        query: String,
    },
    Loaded {
        query: String,
        relevant_count: u64,
        rows: Vec<MetricRow>,
    },
    Failed {
        query: String,
    },
}

impl EvaluationPanel {
    fn from_view(view: &EvaluationView) -> Self {
        match view {
            EvaluationView::Closed => EvaluationPanel::Hidden,
            EvaluationView::Loading { query, .. } => EvaluationPanel::Loading {
                query: query.clone(),
            },
            EvaluationView::Loaded(report) => EvaluationPanel::Loaded {
                query: report.query.clone(),
                relevant_count: report.relevant_count,
                rows: vec![
                    MetricRow::new("TF-IDF", &report.tfidf, report.runtime.tfidf),
                    MetricRow::new("Jaccard", &report.jaccard, report.runtime.jaccard),
                    MetricRow::new("Hybrid", &report.hybrid, report.runtime.hybrid),
                ],
            },
            EvaluationView::Failed { query, .. } => EvaluationPanel::Failed {
                query: query.clone(),
            },
        }
    }
}

/// One algorithm's metrics, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    pub label: &'static str,
    pub precision: String,
    pub recall: String,
    pub f1: String,
    pub runtime: String,
}

impl MetricRow {
    fn new(label: &'static str, metrics: &Metrics, runtime_secs: f64) -> Self {
        Self {
            label,
            precision: format_metric(metrics.precision),
            recall: format_metric(metrics.recall),
            f1: format_metric(metrics.f1),
            runtime: format_runtime(runtime_secs),
        }
    }
}
