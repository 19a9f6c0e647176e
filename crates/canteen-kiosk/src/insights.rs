//! Sales commentary from a hosted language model (Generative Language REST API, no SDK).
//!
//! The analyst never fails: any error is logged and replaced with a fixed sentence.
use crate::views::RevenueBucket;
use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, instrument};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const NO_ANALYSIS: &str = "No analysis available.";
pub const ANALYSIS_UNAVAILABLE: &str = "Could not generate analysis at this time.";

#[async_trait]
pub trait SalesAnalyst: Send + Sync {
    async fn analyze(&self, sales: &[RevenueBucket]) -> String;
}

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not encode sales data: {0}")]
    Encode(#[from] serde_json::Error),
}

pub fn prompt(sales: &[RevenueBucket]) -> Result<String, InsightError> {
    let data = serde_json::to_string(sales)?;
    Ok(format!(
        "Analyze the following Indian canteen sales data (prices in Rupees ₹) and provide a \
         brief, actionable 3-bullet point executive summary for the canteen manager regarding \
         popularity and revenue trends. Data: {data}"
    ))
}

/// Concatenated text parts of the first candidate, if any.
pub fn response_text(resp: &Value) -> Option<String> {
    let parts = resp["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    (!text.trim().is_empty()).then_some(text)
}

pub struct GeminiAnalyst {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiAnalyst {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn generate(&self, sales: &[RevenueBucket]) -> Result<Option<String>, InsightError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        let body = json!({ "contents": [{ "parts": [{ "text": prompt(sales)? }] }] });

        let resp: Value = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response_text(&resp))
    }
}

#[async_trait]
impl SalesAnalyst for GeminiAnalyst {
    #[instrument(skip(self, sales), fields(model = %self.model, buckets = sales.len()))]
    async fn analyze(&self, sales: &[RevenueBucket]) -> String {
        match self.generate(sales).await {
            Ok(Some(text)) => {
                debug!(chars = text.len(), "Analysis received");
                text
            }
            Ok(None) => NO_ANALYSIS.to_string(),
            Err(e) => {
                error!(error = %e, "Sales analysis failed");
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }
}

/// Analyst that always answers with the same text. Used when no API key is configured.
pub struct StaticAnalyst(pub String);

impl Default for StaticAnalyst {
    fn default() -> Self {
        Self(NO_ANALYSIS.to_string())
    }
}

#[async_trait]
impl SalesAnalyst for StaticAnalyst {
    async fn analyze(&self, _sales: &[RevenueBucket]) -> String {
        self.0.clone()
    }
}
