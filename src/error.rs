use thiserror::Error;

/// Reasons a plan request is refused before any service call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("monthly income must be greater than zero")]
    MissingIncome,

    #[error("monthly expenses must be greater than zero")]
    MissingExpenses,

    #[error("a financial goal is required")]
    BlankGoal,
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Please fill all required fields. ({0})")]
    Validation(ValidationFailure),

    #[error("Invalid {field} '{value}': expected one of {expected}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("No plan has been generated yet")]
    NoPlan,

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Text generation failed: {0}")]
    ExternalService(String),

    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ValidationFailure> for PlannerError {
    fn from(failure: ValidationFailure) -> Self {
        PlannerError::Validation(failure)
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
