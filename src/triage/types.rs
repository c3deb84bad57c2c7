// Core types for leak triage: the three answers and the derived decision

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Where the leak shows up (question 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    UnderSink,
    Toilet,
    #[serde(rename = "ceiling_wall", alias = "ceiling_or_wall")]
    CeilingOrWall,
    Unknown,
}

impl Location {
    pub const ALL: [Location; 4] = [
        Location::UnderSink,
        Location::Toilet,
        Location::CeilingOrWall,
        Location::Unknown,
    ];

    /// Token used on the wire and in analytics properties
    pub fn as_str(self) -> &'static str {
        match self {
            Location::UnderSink => "under_sink",
            Location::Toilet => "toilet",
            Location::CeilingOrWall => "ceiling_wall",
            Location::Unknown => "unknown",
        }
    }
}

/// Answer to a yes/no question (questions 2 and 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [YesNo::Yes, YesNo::No];

    pub fn is_yes(self) -> bool {
        matches!(self, YesNo::Yes)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAnswerError {
    #[error("unknown location '{0}' (expected under_sink, toilet, ceiling_wall or unknown)")]
    UnknownLocation(String),
    #[error("expected yes or no, got '{0}'")]
    NotYesNo(String),
}

fn normalize(token: &str) -> String {
    token.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

impl FromStr for Location {
    type Err = ParseAnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "under_sink" | "sink" => Ok(Location::UnderSink),
            "toilet" => Ok(Location::Toilet),
            "ceiling_wall" | "ceiling_or_wall" | "ceiling" | "wall" => Ok(Location::CeilingOrWall),
            "unknown" | "not_sure" => Ok(Location::Unknown),
            _ => Err(ParseAnswerError::UnknownLocation(s.to_string())),
        }
    }
}

impl FromStr for YesNo {
    type Err = ParseAnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "yes" | "y" | "true" => Ok(YesNo::Yes),
            "no" | "n" | "false" => Ok(YesNo::No),
            _ => Err(ParseAnswerError::NotYesNo(s.to_string())),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete set of answers. Only a complete set can be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerSet {
    location: Location,
    actively_leaking: YesNo,
    danger_signal: YesNo,
}

impl AnswerSet {
    pub fn new(location: Location, actively_leaking: YesNo, danger_signal: YesNo) -> Self {
        Self {
            location,
            actively_leaking,
            danger_signal,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn actively_leaking(&self) -> YesNo {
        self.actively_leaking
    }

    pub fn danger_signal(&self) -> YesNo {
        self.danger_signal
    }

    /// Every possible answer set (4 x 2 x 2)
    pub fn all() -> impl Iterator<Item = AnswerSet> {
        Location::ALL.into_iter().flat_map(|location| {
            YesNo::ALL.into_iter().flat_map(move |actively_leaking| {
                YesNo::ALL
                    .into_iter()
                    .map(move |danger_signal| AnswerSet::new(location, actively_leaking, danger_signal))
            })
        })
    }
}

/// Answers collected so far by a running flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PartialAnswers {
    pub location: Option<Location>,
    pub actively_leaking: Option<YesNo>,
    pub danger_signal: Option<YesNo>,
}

impl PartialAnswers {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.actively_leaking.is_none() && self.danger_signal.is_none()
    }

    pub fn complete(&self) -> Option<AnswerSet> {
        Some(AnswerSet::new(
            self.location?,
            self.actively_leaking?,
            self.danger_signal?,
        ))
    }
}

/// Triage outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Monitor,
    Submit,
    Escalate,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Monitor, Decision::Submit, Decision::Escalate];

    /// Urgency is fixed per decision and never set on its own
    pub fn urgency(self) -> Urgency {
        match self {
            Decision::Escalate => Urgency::High,
            Decision::Submit => Urgency::Medium,
            Decision::Monitor => Urgency::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Monitor => "monitor",
            Decision::Submit => "submit",
            Decision::Escalate => "escalate",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Decision::Escalate => "Recommendation: ESCALATE",
            Decision::Submit => "Recommendation: SUBMIT",
            Decision::Monitor => "Recommendation: MONITOR",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn label(self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the user sees after answering the three questions.
///
/// Built only by [`crate::triage::evaluate`]; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionResult {
    pub(crate) decision: Decision,
    pub(crate) urgency: Urgency,
    pub(crate) responsibility_hint: &'static str,
    pub(crate) rationale: &'static str,
    pub(crate) next_steps: &'static [&'static str],
    pub(crate) message_template: String,
}

impl DecisionResult {
    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn responsibility_hint(&self) -> &'static str {
        self.responsibility_hint
    }

    pub fn rationale(&self) -> &'static str {
        self.rationale
    }

    pub fn next_steps(&self) -> &'static [&'static str] {
        self.next_steps
    }

    /// Plain text for an external copy-to-clipboard action
    pub fn message_template(&self) -> &str {
        &self.message_template
    }
}
