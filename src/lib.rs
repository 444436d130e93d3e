// src/lib.rs
//! Terminal client for the Career Compass job match service

pub mod cli;
pub mod config;
pub mod core;
pub mod render;
pub mod repl;
pub mod resume_validator;
pub mod session;
pub mod types;
pub mod utils;

pub use crate::core::{ApiError, CareerApi, ServiceClient};
pub use crate::resume_validator::{ResumeValidator, ValidationError};
pub use crate::session::{CareerSession, SessionError};
pub use crate::types::{ChatMessage, MatchAnalysis, ResumeFile, ResumeSource, Role, SkillGap};
