//! # Financial Goal Planner
//!
//! Turns a handful of personal finance inputs into an LLM-written financial
//! plan, a PDF export of that plan and an expenses-vs-savings pie chart.
//!
//! ## Core Concepts
//!
//! - **Plan request**: monthly income and expenses (INR), a goal, age,
//!   location and the desired tone/format of the report
//! - **Plan generator**: any [`PlanGenerator`]; the `gemini` feature provides
//!   one backed by the Gemini API
//! - **Session**: the caller-owned slot holding the plan currently shown;
//!   each generation overwrites it
//! - **Export**: a Latin-1 PDF with an explicit [`EncodingFallback`] policy
//! - **Chart**: a two-slice [`BreakdownChart`] with savings floored at zero
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_goal_planner::*;
//! use financial_goal_planner::llm::{GeminiConfig, GeminiPlanGenerator};
//!
//! let config = GeminiConfig::from_env()?;
//! let planner = FinancialPlanner::new(GeminiPlanGenerator::from_config(&config));
//! let mut session = PlanSession::new();
//!
//! let request = PlanRequest::new(50_000.0, 30_000.0, "Buy a house")
//!     .with_tone(Tone::Friendly)
//!     .with_format(ReportFormat::Summary);
//!
//! planner.generate(&mut session, &request).await?;
//! std::fs::write(PDF_FILE_NAME, session.export()?.to_pdf_bytes())?;
//! println!("{}", income_breakdown(&request));
//! ```

pub mod chart;
pub mod document;
pub mod error;
pub mod generator;
pub mod pdf;
pub mod planner;
pub mod prompt;
pub mod schema;
pub mod session;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "gemini")]
pub mod llm;

pub use chart::{BreakdownChart, Slice};
pub use document::{
    encode_latin1, render_plan_pdf, replace_currency_symbols, DownloadLink, EncodedText,
    EncodingFallback, PlanDocument, DOCUMENT_TITLE, PDF_FILE_NAME,
};
pub use error::{PlannerError, Result, ValidationFailure};
pub use generator::PlanGenerator;
pub use planner::{income_breakdown, FinancialPlanner, SUCCESS_MESSAGE, VALIDATION_WARNING};
pub use prompt::build_plan_prompt;
pub use schema::*;
pub use session::PlanSession;
