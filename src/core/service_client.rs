// src/core/service_client.rs
//! HTTP client for the career analysis backend

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, trace};

use super::api::{ApiError, CareerApi};
use crate::types::{
    response::{AnalyzeRequest, ChatRequest, ChatResponse, ParseResumeResponse, ServiceInfo},
    MatchAnalysis, ResumeFile,
};

const PARSE_RESUME_ENDPOINT: &str = "/api/parse-resume";
const ANALYZE_ENDPOINT: &str = "/api/analyze";
const CHAT_ENDPOINT: &str = "/api/chat";
const ROOT_ENDPOINT: &str = "/";

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client. Without a timeout a slow backend is waited on indefinitely.
    pub fn new(base_url: impl Into<String>, timeout_seconds: Option<u64>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Backend root endpoint, used as a reachability check
    pub async fn service_info(&self) -> Result<ServiceInfo, ApiError> {
        let url = self.url(ROOT_ENDPOINT);
        trace!("Calling service info: {}", url);

        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    /// Generic POST request with JSON
    async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R, ApiError>
    where
        T: serde::Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        trace!("POST {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl CareerApi for ServiceClient {
    async fn parse_resume(&self, file: &ResumeFile) -> Result<String, ApiError> {
        let url = self.url(PARSE_RESUME_ENDPOINT);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        info!(
            "Uploading resume {} ({} bytes, {}) to {}",
            file.name,
            file.size(),
            file.content_type,
            url
        );

        let response = self.client.post(&url).multipart(form).send().await?;
        let parsed: ParseResumeResponse = read_json(response).await?;

        debug!("Parse service extracted {} characters", parsed.text.len());
        Ok(parsed.text)
    }

    async fn analyze(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<MatchAnalysis, ApiError> {
        let payload = AnalyzeRequest {
            job_description,
            resume_text,
        };

        info!("Calling analysis service: {}", self.url(ANALYZE_ENDPOINT));
        let analysis: MatchAnalysis = self.post_json(ANALYZE_ENDPOINT, &payload).await?;

        info!(
            "Analysis received: score={} level={}",
            analysis.match_score, analysis.match_level
        );
        Ok(analysis)
    }

    async fn chat(&self, query: &str, context: &str) -> Result<String, ApiError> {
        let payload = ChatRequest { query, context };

        debug!(
            "Calling chat service with {} characters of context",
            context.len()
        );
        let reply: ChatResponse = self.post_json(CHAT_ENDPOINT, &payload).await?;
        Ok(reply.response)
    }
}

/// Reads the body as text first so the raw payload can be logged when it does not decode.
async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ApiError> {
    let status = response.status();
    trace!("Response status: {}", status);

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!("Service error response ({}): {}", status, body);
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        error!("Failed to decode service response: {}. Raw response: {}", e, body);
        ApiError::Decode(e)
    })
}
