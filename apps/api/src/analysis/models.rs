use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// What the user asked the bot to do with an uploaded résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AnalyzeResume,
    RecommendJobs,
    MatchJob,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl Action {
    pub const ALL: [Action; 3] = [Action::AnalyzeResume, Action::RecommendJobs, Action::MatchJob];

    pub fn wire_name(self) -> &'static str {
        match self {
            Action::AnalyzeResume => "analyze_resume",
            Action::RecommendJobs => "recommend_jobs",
            Action::MatchJob => "match_job",
        }
    }

    /// Label shown in the action menu.
    pub fn label(self) -> &'static str {
        match self {
            Action::AnalyzeResume => "Resume Analysis",
            Action::RecommendJobs => "Job Recommendations",
            Action::MatchJob => "Job Matching",
        }
    }

    /// Heading displayed above the result.
    pub fn heading(self) -> &'static str {
        match self {
            Action::AnalyzeResume => "Resume Analysis Results",
            Action::RecommendJobs => "Job Recommendations",
            Action::MatchJob => "Job Match Analysis",
        }
    }

    /// Parses the raw selector value. Blank means nothing has been chosen yet.
    pub fn parse_selection(raw: &str) -> Result<Option<Action>, UnknownAction> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some)
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    /// Accepts wire names and menu labels, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Action::ALL
            .into_iter()
            .find(|a| {
                a.wire_name().eq_ignore_ascii_case(needle) || a.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownAction(needle.to_string()))
    }
}

/// One entry of the action menu offered once text has been extracted.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOption {
    pub value: Action,
    pub label: &'static str,
}

pub fn action_menu() -> Vec<ActionOption> {
    Action::ALL
        .into_iter()
        .map(|value| ActionOption {
            value,
            label: value.label(),
        })
        .collect()
}
