use crate::error::{PlannerError, Result, ValidationFailure};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 70;
pub const DEFAULT_AGE: u8 = 30;
pub const DEFAULT_LOCATION: &str = "India";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Motivational,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Professional, Tone::Friendly, Tone::Motivational];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Motivational => "Motivational",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlannerError::InvalidChoice {
                field: "tone",
                value: s.to_string(),
                expected: "Professional, Friendly, Motivational",
            })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Detailed,
    Summary,
    #[serde(rename = "Bullet Points")]
    BulletPoints,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [
        ReportFormat::Detailed,
        ReportFormat::Summary,
        ReportFormat::BulletPoints,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportFormat::Detailed => "Detailed",
            ReportFormat::Summary => "Summary",
            ReportFormat::BulletPoints => "Bullet Points",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportFormat {
    type Err = PlannerError;

    /// Accepts the display label ("Bullet Points") as well as the
    /// command-line friendly spellings "bullet-points" and "bullets".
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace(['-', '_'], " ");
        if normalized.eq_ignore_ascii_case("bullets") {
            return Ok(ReportFormat::BulletPoints);
        }
        ReportFormat::ALL
            .into_iter()
            .find(|format| format.label().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| PlannerError::InvalidChoice {
                field: "format",
                value: s.to_string(),
                expected: "Detailed, Summary, Bullet Points",
            })
    }
}

fn default_age() -> u8 {
    DEFAULT_AGE
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

/// Everything the user supplies for one plan generation.
///
/// Amounts are monthly figures in INR.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRequest {
    pub income: f64,
    pub expenses: f64,
    pub goal: String,
    #[serde(default = "default_age")]
    pub age: u8,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub format: ReportFormat,
}

impl PlanRequest {
    pub fn new(income: f64, expenses: f64, goal: impl Into<String>) -> Self {
        Self {
            income,
            expenses,
            goal: goal.into(),
            age: DEFAULT_AGE,
            location: default_location(),
            tone: Tone::default(),
            format: ReportFormat::default(),
        }
    }

    pub fn with_age(mut self, age: u8) -> Self {
        self.age = age;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// The only gate before a service call: income and expenses must be
    /// non-zero and the goal must contain something besides whitespace.
    pub fn validate(&self) -> std::result::Result<(), ValidationFailure> {
        if !is_positive_amount(self.income) {
            return Err(ValidationFailure::MissingIncome);
        }
        if !is_positive_amount(self.expenses) {
            return Err(ValidationFailure::MissingExpenses);
        }
        if self.goal.trim().is_empty() {
            return Err(ValidationFailure::BlankGoal);
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn is_positive_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
