// src/resume_validator.rs
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{error, info};

use crate::types::ResumeFile;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TXT_MIME: &str = "text/plain";

pub const ALLOWED_MIME_TYPES: [&str; 3] = [PDF_MIME, DOCX_MIME, TXT_MIME];

/// 5MB upload limit; a file of exactly this size is accepted
pub const MAX_RESUME_SIZE: u64 = 5 * 1024 * 1024;

/// Client-side validation failures. The Display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a PDF, DOCX, or TXT file")]
    UnsupportedFileType { content_type: String },

    #[error("File size must be less than 5MB")]
    FileTooLarge { size: u64 },

    #[error("Cannot read resume file {}: {}", .path.display(), .reason)]
    UnreadableFile { path: PathBuf, reason: String },

    #[error("Please provide a job description")]
    MissingJobDescription,

    #[error("Please provide your resume (text or file)")]
    MissingResume,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::UnreadableFile { .. } => "FILE_UNREADABLE",
            Self::MissingJobDescription => "MISSING_JOB_DESCRIPTION",
            Self::MissingResume => "MISSING_RESUME",
        }
    }
}

pub struct ResumeValidator;

impl ResumeValidator {
    /// Type and size checks for a file that is already in memory
    pub fn validate(file: &ResumeFile) -> Result<(), ValidationError> {
        Self::check_content_type(&file.content_type)?;
        Self::check_size(file.size())
    }

    fn check_content_type(content_type: &str) -> Result<(), ValidationError> {
        if ALLOWED_MIME_TYPES.contains(&content_type) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedFileType {
                content_type: content_type.to_string(),
            })
        }
    }

    fn check_size(size: u64) -> Result<(), ValidationError> {
        if size > MAX_RESUME_SIZE {
            Err(ValidationError::FileTooLarge { size })
        } else {
            Ok(())
        }
    }

    /// MIME type derived from the file extension, `application/octet-stream` when unknown
    pub fn content_type_for(path: &Path) -> String {
        mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    /// Validate a file on disk and load it. Size is checked from metadata before reading.
    pub async fn load(path: &Path) -> Result<ResumeFile, ValidationError> {
        let unreadable = |e: std::io::Error| ValidationError::UnreadableFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let content_type = Self::content_type_for(path);
        Self::check_content_type(&content_type).inspect_err(|e| {
            error!("Resume validation failed for {}: {}", path.display(), e);
        })?;

        let metadata = fs::metadata(path).await.map_err(unreadable)?;
        Self::check_size(metadata.len()).inspect_err(|_| {
            error!(
                "Resume file too large: {:.1}MB (max 5MB)",
                metadata.len() as f64 / 1024.0 / 1024.0
            );
        })?;

        let bytes = fs::read(path).await.map_err(unreadable)?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();

        let file = ResumeFile::new(name, content_type, bytes);
        // re-check in case the file grew between stat and read
        Self::validate(&file)?;

        info!(
            "Resume file accepted: {} ({:.1} KB)",
            file.name,
            file.size_kb()
        );
        Ok(file)
    }
}
