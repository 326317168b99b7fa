use safety_shared::models::{Coordinate, GuidelineSet, HazardCategory, SafetyReport};
use safety_shared::paths;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// The two backend queries the portal makes.
#[allow(async_fn_in_trait)]
pub trait SafetyApi {
    async fn check_safety(&self, coord: Coordinate) -> Result<SafetyReport, FetchError>;

    async fn fetch_guidelines(&self, category: HazardCategory)
        -> Result<GuidelineSet, FetchError>;
}

/// JSON over HTTP against the portal backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpApi {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Talk to the server that served the page.
    pub fn same_origin() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        Self::new(origin)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        decode(&body)
    }
}

/// Parse a JSON body, reporting shape mismatches as `Decode`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

impl SafetyApi for HttpApi {
    async fn check_safety(&self, coord: Coordinate) -> Result<SafetyReport, FetchError> {
        self.get_json(&paths::check_safety_path(coord)).await
    }

    async fn fetch_guidelines(
        &self,
        category: HazardCategory,
    ) -> Result<GuidelineSet, FetchError> {
        self.get_json(&paths::guidelines_path(category)).await
    }
}
