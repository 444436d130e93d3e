// src/session.rs
//! Client-side state for one analysis/chat session

use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::core::{ApiError, CareerApi};
use crate::resume_validator::{ResumeValidator, ValidationError};
use crate::types::{ChatMessage, MatchAnalysis, ResumeFile, ResumeSource, Transcript};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error analyzing match. Make sure backend is running on port 8000.")]
    Analysis(#[source] ApiError),

    #[error("Error in chat. Make sure backend is running.")]
    Chat(#[source] ApiError),

    #[error("A request is already in progress")]
    Busy,
}

/// Set while a request is outstanding, cleared on drop.
struct Loading<'a>(&'a mut bool);

impl<'a> Loading<'a> {
    fn begin(flag: &'a mut bool) -> Result<Self, SessionError> {
        if *flag {
            return Err(SessionError::Busy);
        }
        *flag = true;
        Ok(Self(flag))
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct CareerSession<A> {
    api: A,
    job_description: String,
    resume: ResumeSource,
    analysis: Option<MatchAnalysis>,
    transcript: Transcript,
    analysis_loading: bool,
    chat_loading: bool,
}

impl<A: CareerApi> CareerSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            job_description: String::new(),
            resume: ResumeSource::default(),
            analysis: None,
            transcript: Transcript::new(),
            analysis_loading: false,
            chat_loading: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn resume(&self) -> &ResumeSource {
        &self.resume
    }

    /// Entering text drops any selected file
    pub fn set_resume_text(&mut self, text: impl Into<String>) {
        self.resume = ResumeSource::Text(text.into());
    }

    pub fn resume_file(&self) -> Option<&ResumeFile> {
        self.resume.file()
    }

    /// Accepts the file only if it passes validation; on success any entered text is cleared.
    pub fn select_file(&mut self, file: ResumeFile) -> Result<(), SessionError> {
        if let Err(e) = ResumeValidator::validate(&file) {
            warn!("Rejected resume file {}: {} ({})", file.name, e, e.code());
            return Err(e.into());
        }

        info!("Selected resume file {} ({:.1} KB)", file.name, file.size_kb());
        self.resume = ResumeSource::File(file);
        Ok(())
    }

    pub async fn select_file_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let file = ResumeValidator::load(path).await?;
        self.select_file(file)
    }

    pub fn remove_file(&mut self) {
        if self.resume.file().is_some() {
            self.resume = ResumeSource::default();
        }
    }

    pub fn analysis(&self) -> Option<&MatchAnalysis> {
        self.analysis.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_analyzing(&self) -> bool {
        self.analysis_loading
    }

    pub fn is_chatting(&self) -> bool {
        self.chat_loading
    }

    /// Validates inputs, uploads the file when one is selected, then requests the analysis.
    /// On any failure the previous analysis is kept.
    pub async fn analyze(&mut self) -> Result<&MatchAnalysis, SessionError> {
        if self.analysis_loading {
            return Err(SessionError::Busy);
        }
        if self.job_description.trim().is_empty() {
            return Err(ValidationError::MissingJobDescription.into());
        }
        if !self.resume.is_provided() {
            return Err(ValidationError::MissingResume.into());
        }

        let result = {
            let _loading = Loading::begin(&mut self.analysis_loading)?;
            request_analysis(&self.api, &self.job_description, &self.resume).await
        };

        match result {
            Ok(analysis) => Ok(&*self.analysis.insert(analysis)),
            Err(e) => {
                error!("Analysis request failed: {}", e);
                Err(SessionError::Analysis(e))
            }
        }
    }

    /// Sends one chat turn. A blank query is ignored and returns `Ok(None)`.
    /// The user turn is recorded before the request; the assistant turn only on success.
    pub async fn chat(&mut self, query: &str) -> Result<Option<&ChatMessage>, SessionError> {
        if self.chat_loading {
            return Err(SessionError::Busy);
        }
        if query.trim().is_empty() {
            return Ok(None);
        }

        self.transcript.push(ChatMessage::user(query));

        let result = {
            let _loading = Loading::begin(&mut self.chat_loading)?;
            request_chat(&self.api, query, &self.resume).await
        };

        match result {
            Ok(response) => Ok(Some(self.transcript.push(ChatMessage::assistant(response)))),
            Err(e) => {
                error!("Chat request failed: {}", e);
                Err(SessionError::Chat(e))
            }
        }
    }
}

async fn request_analysis<A: CareerApi>(
    api: &A,
    job_description: &str,
    resume: &ResumeSource,
) -> Result<MatchAnalysis, ApiError> {
    let resume_text = match resume {
        ResumeSource::File(file) => api.parse_resume(file).await?,
        ResumeSource::Text(text) => text.clone(),
    };

    api.analyze(job_description, &resume_text).await
}

async fn request_chat<A: CareerApi>(
    api: &A,
    query: &str,
    resume: &ResumeSource,
) -> Result<String, ApiError> {
    let context = match resume {
        ResumeSource::Text(text) => text.clone(),
        // no cached text: the file is parsed again on every turn
        ResumeSource::File(file) => match api.parse_resume(file).await {
            Ok(text) => text,
            Err(e) if e.is_status() => {
                warn!("Resume parsing failed, chatting without context: {}", e);
                String::new()
            }
            Err(e) => return Err(e),
        },
    };

    debug!("Chat context: {} characters", context.len());
    api.chat(query, &context).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume_validator::{MAX_RESUME_SIZE, PDF_MIME, TXT_MIME};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Parse(String),
        Analyze { job_description: String, resume_text: String },
        Chat { query: String, context: String },
    }

    #[derive(Default)]
    struct MockApi {
        calls: Mutex<Vec<Call>>,
        parsed_text: String,
        parse_status: Option<u16>,
        analyze_status: Option<u16>,
        chat_status: Option<u16>,
    }

    impl MockApi {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn fail(status: Option<u16>) -> Result<(), ApiError> {
            match status {
                Some(status) => Err(ApiError::Status {
                    status,
                    body: "boom".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl CareerApi for MockApi {
        async fn parse_resume(&self, file: &ResumeFile) -> Result<String, ApiError> {
            self.record(Call::Parse(file.name.clone()));
            Self::fail(self.parse_status)?;
            Ok(self.parsed_text.clone())
        }

        async fn analyze(
            &self,
            job_description: &str,
            resume_text: &str,
        ) -> Result<MatchAnalysis, ApiError> {
            self.record(Call::Analyze {
                job_description: job_description.to_string(),
                resume_text: resume_text.to_string(),
            });
            Self::fail(self.analyze_status)?;
            Ok(sample_analysis())
        }

        async fn chat(&self, query: &str, context: &str) -> Result<String, ApiError> {
            self.record(Call::Chat {
                query: query.to_string(),
                context: context.to_string(),
            });
            Self::fail(self.chat_status)?;
            Ok(format!("answer to {query}"))
        }
    }

    fn sample_analysis() -> MatchAnalysis {
        MatchAnalysis {
            match_score: 7.0,
            match_level: "Good Match".to_string(),
            skills_matched: vec!["React".to_string()],
            skills_gaps: vec![],
            strengths_found: vec!["CSS".to_string()],
            actionable_tip: "Learn TypeScript".to_string(),
        }
    }

    fn pdf(name: &str) -> ResumeFile {
        ResumeFile::new(name, PDF_MIME, b"%PDF-1.4".to_vec())
    }

    #[test]
    fn test_unsupported_file_leaves_resume_unset() {
        let mut session = CareerSession::new(MockApi::default());
        let err = session
            .select_file(ResumeFile::new("cv.png", "image/png", vec![1, 2, 3]))
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::UnsupportedFileType { .. })
        ));
        assert!(session.resume_file().is_none());
    }

    #[test]
    fn test_oversized_file_keeps_previous_text() {
        let mut session = CareerSession::new(MockApi::default());
        session.set_resume_text("I know Rust");

        let big = ResumeFile::new("cv.txt", TXT_MIME, vec![b'a'; MAX_RESUME_SIZE as usize + 1]);
        assert!(session.select_file(big).is_err());
        assert_eq!(session.resume().text(), Some("I know Rust"));
    }

    #[test]
    fn test_accepted_file_clears_text() {
        let mut session = CareerSession::new(MockApi::default());
        session.set_resume_text("I know Rust");

        let file = ResumeFile::new("cv.txt", TXT_MIME, vec![b'a'; MAX_RESUME_SIZE as usize]);
        session.select_file(file).unwrap();

        assert!(session.resume().text().is_none());
        assert_eq!(session.resume_file().map(|f| f.name.as_str()), Some("cv.txt"));

        session.remove_file();
        assert_eq!(session.resume(), &ResumeSource::default());
    }

    #[tokio::test]
    async fn test_analyze_requires_job_description() {
        let mut session = CareerSession::new(MockApi::default());
        session.set_job_description("   ");
        session.set_resume_text("I know React and CSS");

        let err = session.analyze().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::MissingJobDescription)
        ));
        assert_eq!(err.to_string(), "Please provide a job description");
        assert!(session.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_requires_resume() {
        let mut session = CareerSession::new(MockApi::default());
        session.set_job_description("React developer");

        let err = session.analyze().await.unwrap_err();
        assert_eq!(err.to_string(), "Please provide your resume (text or file)");
        assert!(session.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_with_text_calls_analyze_once() {
        let mut session = CareerSession::new(MockApi::default());
        session.set_job_description("React developer");
        session.set_resume_text("I know React and CSS");

        let analysis = session.analyze().await.unwrap();
        assert_eq!(analysis.match_score, 7.0);

        assert_eq!(
            session.api().calls(),
            vec![Call::Analyze {
                job_description: "React developer".to_string(),
                resume_text: "I know React and CSS".to_string(),
            }]
        );
        assert!(!session.is_analyzing());
    }

    #[tokio::test]
    async fn test_analyze_with_file_uses_parsed_text() {
        let api = MockApi {
            parsed_text: "Extracted resume".to_string(),
            ..Default::default()
        };
        let mut session = CareerSession::new(api);
        session.set_job_description("Backend engineer");
        session.select_file(pdf("cv.pdf")).unwrap();

        session.analyze().await.unwrap();

        assert_eq!(
            session.api().calls(),
            vec![
                Call::Parse("cv.pdf".to_string()),
                Call::Analyze {
                    job_description: "Backend engineer".to_string(),
                    resume_text: "Extracted resume".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_parse_failure_aborts_analysis() {
        let api = MockApi {
            parse_status: Some(400),
            ..Default::default()
        };
        let mut session = CareerSession::new(api);
        session.set_job_description("Backend engineer");
        session.select_file(pdf("cv.pdf")).unwrap();

        let err = session.analyze().await.unwrap_err();
        assert!(matches!(err, SessionError::Analysis(ApiError::Status { status: 400, .. })));
        assert_eq!(session.api().calls(), vec![Call::Parse("cv.pdf".to_string())]);
        assert!(!session.is_analyzing());
    }

    #[tokio::test]
    async fn test_failed_analysis_keeps_previous_result() {
        let mut session = CareerSession::new(MockApi::default());
        session.set_job_description("React developer");
        session.set_resume_text("I know React and CSS");
        session.analyze().await.unwrap();

        session.api.analyze_status = Some(500);
        let err = session.analyze().await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Error analyzing match. Make sure backend is running on port 8000."
        );
        assert_eq!(session.analysis(), Some(&sample_analysis()));
        assert!(!session.is_analyzing());
    }

    #[tokio::test]
    async fn test_blank_chat_query_is_ignored() {
        let mut session = CareerSession::new(MockApi::default());
        assert!(session.chat("  ").await.unwrap().is_none());
        assert!(session.transcript().is_empty());
        assert!(session.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_chat_appends_user_then_assistant() {
        let mut session = CareerSession::new(MockApi::default());
        session.set_resume_text("I know React and CSS");

        let reply = session.chat("Am I ready?").await.unwrap().cloned();
        assert_eq!(reply, Some(ChatMessage::assistant("answer to Am I ready?")));

        assert_eq!(
            session.transcript().messages(),
            &[
                ChatMessage::user("Am I ready?"),
                ChatMessage::assistant("answer to Am I ready?"),
            ]
        );
        assert_eq!(
            session.api().calls(),
            vec![Call::Chat {
                query: "Am I ready?".to_string(),
                context: "I know React and CSS".to_string(),
            }]
        );
        assert!(!session.is_chatting());
    }

    #[tokio::test]
    async fn test_chat_failure_keeps_only_user_turn() {
        let api = MockApi {
            chat_status: Some(503),
            ..Default::default()
        };
        let mut session = CareerSession::new(api);

        let err = session.chat("Hello?").await.unwrap_err();
        assert_eq!(err.to_string(), "Error in chat. Make sure backend is running.");
        assert_eq!(session.transcript().messages(), &[ChatMessage::user("Hello?")]);
        assert!(!session.is_chatting());
    }

    #[tokio::test]
    async fn test_chat_reparses_file_each_turn() {
        let api = MockApi {
            parsed_text: "Parsed CV".to_string(),
            ..Default::default()
        };
        let mut session = CareerSession::new(api);
        session.select_file(pdf("cv.pdf")).unwrap();

        session.chat("first").await.unwrap();
        session.chat("second").await.unwrap();

        let parses = session
            .api()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Parse(_)))
            .count();
        assert_eq!(parses, 2);
        assert_eq!(session.transcript().len(), 4);
    }

    #[tokio::test]
    async fn test_chat_parse_error_status_falls_back_to_empty_context() {
        let api = MockApi {
            parse_status: Some(500),
            ..Default::default()
        };
        let mut session = CareerSession::new(api);
        session.select_file(pdf("cv.pdf")).unwrap();

        session.chat("Any tips?").await.unwrap();

        assert_eq!(
            session.api().calls().last(),
            Some(&Call::Chat {
                query: "Any tips?".to_string(),
                context: String::new(),
            })
        );
    }

    #[test]
    fn test_loading_flag_rejects_second_request() {
        let mut flag = false;
        let guard = Loading::begin(&mut flag).unwrap();
        drop(guard);
        assert!(!flag);

        let mut busy = true;
        assert!(matches!(Loading::begin(&mut busy), Err(SessionError::Busy)));
        assert!(busy);
    }
}
