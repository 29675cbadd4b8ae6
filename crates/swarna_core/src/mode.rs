use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scoring algorithm requested from the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmMode {
    Tfidf,
    Jaccard,
    /// Server-side blend of both scores. Shown to users as "Semua".
    #[default]
    Combined,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm mode: {0:?}")]
pub struct UnknownMode(pub String);

impl AlgorithmMode {
    /// Tab order in the front end.
    pub const ALL: [AlgorithmMode; 3] = [
        AlgorithmMode::Combined,
        AlgorithmMode::Tfidf,
        AlgorithmMode::Jaccard,
    ];

    /// Stable token used in tab storage.
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmMode::Tfidf => "tfidf",
            AlgorithmMode::Jaccard => "jaccard",
            AlgorithmMode::Combined => "combined",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlgorithmMode::Tfidf => "TF-IDF",
            AlgorithmMode::Jaccard => "Jaccard",
            AlgorithmMode::Combined => "Semua",
        }
    }

    /// Token sent as the `mode` query parameter. Only `Combined` is renamed;
    /// the endpoint decides which name it expects.
    pub fn wire_token<'a>(self, combined_token: &'a str) -> &'a str {
        match self {
            AlgorithmMode::Combined => combined_token,
            other => other.as_str(),
        }
    }

    pub fn shows_tfidf(self) -> bool {
        matches!(self, AlgorithmMode::Tfidf | AlgorithmMode::Combined)
    }

    pub fn shows_jaccard(self) -> bool {
        matches!(self, AlgorithmMode::Jaccard | AlgorithmMode::Combined)
    }
}

impl fmt::Display for AlgorithmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmMode {
    type Err = UnknownMode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(AlgorithmMode::Tfidf),
            "jaccard" => Ok(AlgorithmMode::Jaccard),
            "combined" | "hybrid" | "all" | "semua" | "kombinasi" => Ok(AlgorithmMode::Combined),
            _ => Err(UnknownMode(raw.to_string())),
        }
    }
}
