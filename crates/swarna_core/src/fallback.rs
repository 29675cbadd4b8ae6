use std::sync::OnceLock;

use swarna_logging::swarna_error;

use crate::normalize::{normalize_documents, RawDocument};
use crate::SearchRecord;

const FALLBACK_JSON: &str = include_str!("../data/fallback.json");

static DATASET: OnceLock<Vec<SearchRecord>> = OnceLock::new();

/// Records bundled with the client for use while the service is unreachable.
pub fn fallback_dataset() -> &'static [SearchRecord] {
    DATASET.get_or_init(|| match serde_json::from_str::<Vec<RawDocument>>(FALLBACK_JSON) {
        Ok(docs) => normalize_documents(docs),
        Err(err) => {
            swarna_error!("Bundled fallback dataset is unreadable: {}", err);
            Vec::new()
        }
    })
}

/// Offline search: case-insensitive substring match on title or description.
pub fn filter_fallback(query: &str) -> Vec<SearchRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    fallback_dataset()
        .iter()
        .filter(|record| record.matches_text(&needle))
        .cloned()
        .collect()
}
