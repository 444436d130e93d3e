use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ===== Request bodies =====

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub job_description: &'a str,
    pub resume_text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub query: &'a str,
    pub context: &'a str,
}

// ===== Service Response Types =====

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResumeResponse {
    pub text: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}
