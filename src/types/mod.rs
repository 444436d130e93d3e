// src/types/mod.rs
pub mod analysis;
pub mod chat;
pub mod resume;
pub mod response;

pub use analysis::{Importance, MatchAnalysis, SkillGap};
pub use chat::{ChatMessage, Role, Transcript};
pub use resume::{ResumeFile, ResumeSource};
