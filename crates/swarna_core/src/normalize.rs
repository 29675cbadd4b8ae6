//! Maps every result shape the client has ever seen onto [`SearchRecord`].
//!
//! Four shapes reach the client:
//! - the service's `/search` hit: `{ document: { no, judul, ... }, tfidf_score, jaccard_score }`
//! - the single-score `/search` hit: `{ document: { ... }, score }`, where `score` is TF-IDF
//! - the flat hit of the service's hybrid scorer: `{ no, judul, ..., score_tfidf, score_jaccard }`
//! - the legacy front-end record: `{ id, title, snippet, image, category, score_tfidf, score_jaccard }`
//!
//! Field alternatives are resolved here and nowhere else.
use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use swarna_logging::swarna_warn;

use crate::SearchRecord;

const DEFAULT_CATEGORY: &str = "lainnya";

/// Body of `GET /search`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub query: Option<String>,
    pub results: Vec<RemoteHit>,
}

/// One entry of `SearchResponse::results`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RemoteHit {
    pub document: Option<RawDocument>,
    pub tfidf_score: Option<f64>,
    pub jaccard_score: Option<f64>,
    /// Fields sent at the top level instead of under `document`.
    #[serde(flatten)]
    pub flat: RawDocument,
}

/// Every field name any producer has used, kept apart so that records
/// carrying duplicates (`kategori` and `category`) still parse.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RawDocument {
    pub no: Option<Value>,
    pub id: Option<Value>,
    pub judul: Option<String>,
    pub title: Option<String>,
    pub deskripsi: Option<String>,
    pub snippet: Option<String>,
    pub description: Option<String>,
    pub gambar: Option<String>,
    pub image: Option<String>,
    pub kategori: Option<String>,
    pub category: Option<String>,
    pub asal_daerah: Option<String>,
    pub cara_main: Option<String>,
    pub link: Option<String>,
    pub score_tfidf: Option<f64>,
    pub score_jaccard: Option<f64>,
    /// Single TF-IDF score; a named TF-IDF field wins over it.
    pub score: Option<f64>,
}

impl RawDocument {
    /// Field-wise merge; values already present in `self` win.
    fn or(self, other: RawDocument) -> RawDocument {
        RawDocument {
            no: self.no.or(other.no),
            id: self.id.or(other.id),
            judul: self.judul.or(other.judul),
            title: self.title.or(other.title),
            deskripsi: self.deskripsi.or(other.deskripsi),
            snippet: self.snippet.or(other.snippet),
            description: self.description.or(other.description),
            gambar: self.gambar.or(other.gambar),
            image: self.image.or(other.image),
            kategori: self.kategori.or(other.kategori),
            category: self.category.or(other.category),
            asal_daerah: self.asal_daerah.or(other.asal_daerah),
            cara_main: self.cara_main.or(other.cara_main),
            link: self.link.or(other.link),
            score_tfidf: self.score_tfidf.or(other.score_tfidf),
            score_jaccard: self.score_jaccard.or(other.score_jaccard),
            score: self.score.or(other.score),
        }
    }

    fn into_record(self, position: usize) -> SearchRecord {
        let id = self
            .no
            .as_ref()
            .and_then(id_text)
            .or_else(|| self.id.as_ref().and_then(id_text))
            .unwrap_or_else(|| format!("#{position}"));

        SearchRecord {
            id,
            title: first_text([self.judul, self.title]).unwrap_or_default(),
            description: first_text([self.deskripsi, self.snippet, self.description])
                .unwrap_or_default(),
            image_url: first_text([self.gambar, self.image]).unwrap_or_default(),
            category: first_text([self.kategori, self.category])
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            origin_region: first_text([self.asal_daerah]),
            usage_note: first_text([self.cara_main]),
            external_link: first_text([self.link]),
            score_tfidf: finite_or_zero(self.score_tfidf.or(self.score)),
            score_jaccard: finite_or_zero(self.score_jaccard),
        }
    }
}

/// Normalizes remote hits, preserving order and dropping repeated ids.
pub fn normalize_hits(hits: impl IntoIterator<Item = RemoteHit>) -> Vec<SearchRecord> {
    unique_by_id(hits.into_iter().enumerate().map(|(position, hit)| {
        let RemoteHit {
            document,
            tfidf_score,
            jaccard_score,
            flat,
        } = hit;
        let mut merged = document.unwrap_or_default().or(flat);
        merged.score_tfidf = tfidf_score.or(merged.score_tfidf);
        merged.score_jaccard = jaccard_score.or(merged.score_jaccard);
        merged.into_record(position)
    }))
}

/// Normalizes bare documents (the bundled dataset and legacy records).
pub fn normalize_documents(docs: impl IntoIterator<Item = RawDocument>) -> Vec<SearchRecord> {
    unique_by_id(
        docs.into_iter()
            .enumerate()
            .map(|(position, doc)| doc.into_record(position)),
    )
}

fn unique_by_id(records: impl Iterator<Item = SearchRecord>) -> Vec<SearchRecord> {
    let mut seen = HashSet::new();
    records
        .filter(|record| {
            let fresh = seen.insert(record.id.clone());
            if !fresh {
                swarna_warn!("Dropping result with duplicate id {:?}", record.id);
            }
            fresh
        })
        .collect()
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn first_text<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
}

fn finite_or_zero(score: Option<f64>) -> f64 {
    score.filter(|value| value.is_finite()).unwrap_or(0.0)
}
