use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};

use crate::models::ExtractionResult;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport seam for the AI backend. Production uses HTTP; tests
/// substitute a canned implementation.
pub trait Backend: Send {
    fn post(&self, path: &str, body: &Value) -> Result<Value>;
}

#[derive(Debug)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl Backend for HttpBackend {
    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .with_context(|| format!("Failed to reach AI backend at {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(anyhow!(
                "AI backend request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response.json().context("Failed to parse AI backend response")
    }
}

/// Client for the three enrichment endpoints. Each call is a single
/// attempt, time-bounded by the backend's timeout; no retry. The
/// credential is always passed in explicitly.
pub struct AiClient {
    backend: Box<dyn Backend>,
}

impl AiClient {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn over_http(base_url: &str) -> Result<Self> {
        Ok(Self::new(Box::new(HttpBackend::new(base_url)?)))
    }

    /// Pull role/company/location out of a free-text job description.
    pub fn extract(&self, text: &str, api_key: &str) -> Result<ExtractionResult> {
        let data = self.call(
            "/extract",
            json!({ "text": text, "api_key": api_key }),
            "data",
        )?;
        serde_json::from_value(data).context("Malformed extraction data in AI response")
    }

    /// Skill-gap analysis of a job description against the user's profile.
    pub fn analyze_gap(&self, job_description: &str, api_key: &str) -> Result<String> {
        let analysis = self.call(
            "/analyze-gap",
            json!({ "job_description": job_description, "api_key": api_key }),
            "analysis",
        )?;
        as_text(analysis, "analysis")
    }

    /// Generate or rework LaTeX resume source. `current_latex` is sent as
    /// context so the model edits rather than starts over.
    pub fn optimize_resume(
        &self,
        description: &str,
        current_latex: &str,
        api_key: &str,
    ) -> Result<String> {
        let optimized = self.call(
            "/optimize",
            json!({
                "description": description,
                "current_latex": current_latex,
                "api_key": api_key,
            }),
            "optimized_text",
        )?;
        Ok(strip_code_fences(&as_text(optimized, "optimized_text")?))
    }

    // Every endpoint answers { "status": "success", <field>: ... }; on
    // error the same field carries the detail string.
    fn call(&self, path: &str, body: Value, field: &str) -> Result<Value> {
        let response = self.backend.post(path, &body)?;
        let status = response.get("status").and_then(Value::as_str).unwrap_or("");
        if status != "success" {
            let detail = response
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or("no detail");
            return Err(anyhow!("AI backend reported an error: {}", detail));
        }
        response
            .get(field)
            .cloned()
            .ok_or_else(|| anyhow!("AI response missing '{}' field", field))
    }
}

fn as_text(value: Value, field: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("AI response '{}' field is not text", field))
}

fn strip_code_fences(text: &str) -> String {
    text.replace("```latex", "").replace("```", "").trim().to_string()
}
