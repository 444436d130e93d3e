// src/render.rs
//! Plain-text rendering of analysis results and chat transcripts

use std::fmt::Write;

use crate::types::{ChatMessage, MatchAnalysis, Role, Transcript};

pub const CHAT_SUGGESTIONS: [&str; 3] = [
    "What skills should I learn for data science roles?",
    "Am I ready for frontend developer positions?",
    "How can I improve my resume for tech jobs?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Moderate,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::Excellent
        } else if score >= 6.0 {
            Self::Good
        } else if score >= 4.0 {
            Self::Moderate
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Match",
            Self::Good => "Good Match",
            Self::Moderate => "Moderate Match",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// `7` renders as `7/10`, `7.5` as `7.5/10`
pub fn format_score(score: f64) -> String {
    format!("{}/10", score)
}

pub fn render_analysis(analysis: &MatchAnalysis) -> String {
    let mut out = String::new();
    let band = ScoreBand::from_score(analysis.match_score);

    // writing into a String cannot fail
    let _ = writeln!(out, "🎯 {}  {}", format_score(analysis.match_score), band.label());
    let _ = writeln!(out, "   {}", analysis.match_level);

    let _ = writeln!(out, "\n✅ Matched Skills");
    write_list(&mut out, &analysis.skills_matched);

    if analysis.has_gaps() {
        let _ = writeln!(out, "\n⚠️  Skills to Develop");
        for gap in &analysis.skills_gaps {
            let _ = writeln!(out, "  • {} [{} priority]", gap.skill, gap.importance);
            let _ = writeln!(out, "    {}", gap.suggestion);
        }
    }

    let _ = writeln!(out, "\n💪 Your Strengths");
    write_list(&mut out, &analysis.strengths_found);

    let _ = writeln!(out, "\n💡 Actionable Tip");
    let _ = writeln!(out, "  {}", analysis.actionable_tip);

    out
}

fn write_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for item in items {
        let _ = writeln!(out, "  • {}", item);
    }
}

pub fn render_message(message: &ChatMessage) -> String {
    let prefix = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    format!("[{}] {}", prefix, message.content)
}

pub fn render_transcript(transcript: &Transcript) -> String {
    if transcript.is_empty() {
        return render_suggestions();
    }

    transcript
        .messages()
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_suggestions() -> String {
    let mut out = String::from("Start a Conversation. Try asking:");
    for (idx, suggestion) in CHAT_SUGGESTIONS.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", idx + 1, suggestion);
    }
    out
}
