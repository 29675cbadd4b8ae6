use std::time::Duration;

use serde::de::DeserializeOwned;
use swarna_core::{AlgorithmMode, EvaluationReport, SearchResponse};
use swarna_logging::swarna_debug;
use url::Url;

use crate::{FailureKind, FetchError, RetryPolicy};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Root of the scoring service; `search` and `evaluate` are resolved against it.
    pub base_url: String,
    /// Name `/search` expects for the combined mode.
    pub combined_wire_token: String,
    /// Result depth requested from both endpoints; the service default applies when unset.
    pub top_k: Option<u32>,
    pub connect_timeout: Duration,
    /// Whole-request timeout. Unset means a hung request waits forever.
    pub request_timeout: Option<Duration>,
    pub retry: RetryPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            combined_wire_token: "combined".to_string(),
            top_k: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            retry: RetryPolicy::default(),
        }
    }
}

#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, mode: AlgorithmMode)
        -> Result<SearchResponse, FetchError>;

    async fn evaluate(&self, query: &str) -> Result<EvaluationReport, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchClient {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestSearchClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let base = parse_base(&settings.base_url)?;
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// `{base}/search?q=..&mode=..[&top_k=..]`
    pub fn search_url(&self, query: &str, mode: AlgorithmMode) -> Result<Url, FetchError> {
        let token = mode.wire_token(&self.settings.combined_wire_token);
        self.endpoint("search", &[("q", query), ("mode", token)])
    }

    /// `{base}/evaluate?q=..[&top_k=..]`
    pub fn evaluate_url(&self, query: &str) -> Result<Url, FetchError> {
        self.endpoint("evaluate", &[("q", query)])
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            if let Some(top_k) = self.settings.top_k {
                pairs.append_pair("top_k", &top_k.to_string());
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        swarna_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SearchBackend for ReqwestSearchClient {
    async fn search(
        &self,
        query: &str,
        mode: AlgorithmMode,
    ) -> Result<SearchResponse, FetchError> {
        let url = self.search_url(query, mode)?;
        self.settings
            .retry
            .run("search", || self.get_json(url.clone()))
            .await
    }

    async fn evaluate(&self, query: &str) -> Result<EvaluationReport, FetchError> {
        let url = self.evaluate_url(query)?;
        self.settings
            .retry
            .run("evaluate", || self.get_json(url.clone()))
            .await
    }
}

fn parse_base(raw: &str) -> Result<Url, FetchError> {
    // Without a trailing slash `join` would replace the last path segment.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let base = Url::parse(&normalized)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("{raw} cannot be a base url"),
        ));
    }
    Ok(base)
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
