// src/types/resume.rs
use std::fmt;

/// A resume file selected for upload. Only built through `ResumeValidator`
/// outside of tests, so the type and size constraints already hold.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn size_kb(&self) -> f64 {
        self.size() as f64 / 1024.0
    }
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

/// The active resume representation: inline text or a selected file, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeSource {
    Text(String),
    File(ResumeFile),
}

impl Default for ResumeSource {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl ResumeSource {
    /// True when there is something to send: non-blank text or a file.
    pub fn is_provided(&self) -> bool {
        match self {
            Self::Text(text) => !text.trim().is_empty(),
            Self::File(_) => true,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File(_) => None,
        }
    }

    pub fn file(&self) -> Option<&ResumeFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Text(_) => None,
        }
    }
}
