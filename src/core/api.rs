// src/core/api.rs
//! Typed seam between the session logic and the remote analysis service

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{MatchAnalysis, ResumeFile};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode service response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The service answered, but not with a success status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

#[async_trait]
pub trait CareerApi: Send + Sync {
    /// `POST /api/parse-resume`, returns the extracted text
    async fn parse_resume(&self, file: &ResumeFile) -> Result<String, ApiError>;

    /// `POST /api/analyze`
    async fn analyze(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<MatchAnalysis, ApiError>;

    /// `POST /api/chat`, returns the assistant answer
    async fn chat(&self, query: &str, context: &str) -> Result<String, ApiError>;
}
