//! Command-line front end for the planner

use crate::error::Result;
use crate::schema::{
    PlanRequest, ReportFormat, Tone, DEFAULT_AGE, DEFAULT_LOCATION, MAX_AGE, MIN_AGE,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "financial-planner")]
#[command(
    author,
    version,
    about = "AI financial goal planner: savings, investments and a PDF report",
    long_about = None
)]
pub struct Cli {
    /// Monthly income in INR
    #[arg(long, value_parser = parse_amount, required_unless_present = "request")]
    pub income: Option<f64>,

    /// Monthly expenses in INR
    #[arg(long, value_parser = parse_amount, required_unless_present = "request")]
    pub expenses: Option<f64>,

    /// Your financial goal (e.g. "Buy a house", "Retire early")
    #[arg(long, required_unless_present = "request")]
    pub goal: Option<String>,

    /// Your age
    #[arg(
        long,
        default_value_t = DEFAULT_AGE,
        value_parser = clap::value_parser!(u8).range(MIN_AGE as i64..=MAX_AGE as i64)
    )]
    pub age: u8,

    /// Your location, used for investment suggestions
    #[arg(long, default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// Report tone: Professional, Friendly or Motivational
    #[arg(long, default_value = "Professional")]
    pub tone: Tone,

    /// Report format: Detailed, Summary or "Bullet Points"
    #[arg(long, default_value = "Detailed")]
    pub format: ReportFormat,

    /// Read the whole request from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["income", "expenses", "goal"])]
    pub request: Option<PathBuf>,

    /// Where to write the PDF report
    #[arg(short, long, default_value = "financial_plan.pdf")]
    pub output: PathBuf,

    /// Also write the income breakdown chart as SVG
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Ask for a second plan after the first one and keep only the new one
    #[arg(long)]
    pub regenerate: bool,

    /// Print the report as a base64 `data:` download link
    #[arg(long)]
    pub print_link: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn plan_request(&self) -> Result<PlanRequest> {
        if let Some(path) = &self.request {
            let json = std::fs::read_to_string(path)?;
            return PlanRequest::from_json(&json);
        }

        Ok(PlanRequest::new(
            self.income.unwrap_or_default(),
            self.expenses.unwrap_or_default(),
            self.goal.clone().unwrap_or_default(),
        )
        .with_age(self.age)
        .with_location(self.location.clone())
        .with_tone(self.tone)
        .with_format(self.format))
    }
}

fn parse_amount(value: &str) -> std::result::Result<f64, String> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("'{}' must be a non-negative amount", value));
    }
    Ok(amount)
}
