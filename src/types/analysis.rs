// src/types/analysis.rs
//! Match analysis produced by the backend `/api/analyze` endpoint

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    /// 0-10 compatibility rating
    pub match_score: f64,
    pub match_level: String,
    pub skills_matched: Vec<String>,
    #[serde(default)]
    pub skills_gaps: Vec<SkillGap>,
    pub strengths_found: Vec<String>,
    pub actionable_tip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub importance: Importance,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unspecified,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unspecified => "unspecified",
        }
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MatchAnalysis {
    pub fn has_gaps(&self) -> bool {
        !self.skills_gaps.is_empty()
    }

    pub fn high_priority_gaps(&self) -> impl Iterator<Item = &SkillGap> {
        self.skills_gaps
            .iter()
            .filter(|gap| gap.importance == Importance::High)
    }
}
