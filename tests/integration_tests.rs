use chrono::{TimeZone, Utc};
use financial_goal_planner::*;
use futures::executor::block_on;
use futures::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers every prompt with a numbered canned plan.
struct CannedGenerator {
    calls: AtomicUsize,
}

impl CannedGenerator {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PlanGenerator for CannedGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let tone_line = prompt
            .lines()
            .find(|line| line.starts_with("Generate a"))
            .unwrap_or_default()
            .to_string();
        async move {
            Ok(format!(
                "Plan #{}\n{}\n1. Savings plan: put ₹20,000 into a SIP\n2. Budget: ₹30,000 — rent & food\n3. Tip: review yearly 📈",
                n, tone_line
            ))
        }
        .boxed()
    }
}

fn sample_request() -> PlanRequest {
    PlanRequest::new(50000.0, 30000.0, "Buy a house in 10 years")
        .with_age(32)
        .with_location("Bengaluru")
}

#[test]
fn test_generate_chart_and_export_flow() {
    let planner = FinancialPlanner::new(CannedGenerator::new());
    let mut session = PlanSession::new();
    let request = sample_request();

    let plan = block_on(planner.generate(&mut session, &request)).unwrap();
    assert!(plan.starts_with("Plan #1"));
    assert!(plan.contains("detailed report in a professional tone"));

    let chart = income_breakdown(&request);
    assert_eq!(chart.expenses(), 30000.0);
    assert_eq!(chart.savings(), 20000.0);
    let labels: Vec<String> = chart.slices().iter().map(|s| s.percentage_label()).collect();
    assert_eq!(labels, vec!["60.0%", "40.0%"]);

    let document = session
        .export()
        .unwrap()
        .with_created_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(document.paragraph_count(), 5);
    // em dash and chart emoji are outside Latin-1
    assert_eq!(document.replaced_characters(), 2);

    let pdf = document.to_pdf_bytes();
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.starts_with("%PDF-"));
    assert!(text.contains("(Financial Goal Plan) Tj"));
    assert!(text.contains("put INR 20,000 into a SIP"));
    assert!(text.contains("INR 30,000 ? rent & food"));
    assert!(!text.contains('₹'));
}

#[tokio::test]
async fn test_regeneration_keeps_only_latest_plan() {
    let planner = FinancialPlanner::new(CannedGenerator::new());
    let mut session = PlanSession::new();
    let request = sample_request();

    planner.generate(&mut session, &request).await.unwrap();

    let request = request
        .with_tone(Tone::Motivational)
        .with_format(ReportFormat::BulletPoints);
    planner.regenerate(&mut session, &request).await.unwrap();

    let plan = session.plan().unwrap();
    assert!(plan.starts_with("Plan #2"));
    assert!(plan.contains("bullet points report in a motivational tone"));
    assert!(!plan.contains("Plan #1"));
    assert_eq!(planner.generator().calls(), 2);
}

#[test]
fn test_invalid_inputs_only_warn() {
    let planner = FinancialPlanner::new(CannedGenerator::new());
    let mut session = PlanSession::new();

    let cases = [
        (PlanRequest::new(0.0, 30000.0, "House"), ValidationFailure::MissingIncome),
        (PlanRequest::new(50000.0, 0.0, "House"), ValidationFailure::MissingExpenses),
        (PlanRequest::new(50000.0, 30000.0, ""), ValidationFailure::BlankGoal),
        (PlanRequest::new(50000.0, 30000.0, "  \t"), ValidationFailure::BlankGoal),
    ];

    for (request, expected) in cases {
        match block_on(planner.generate(&mut session, &request)) {
            Err(PlannerError::Validation(failure)) => assert_eq!(failure, expected),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    assert_eq!(planner.generator().calls(), 0);
    assert!(session.plan().is_none());
}

#[test]
fn test_every_line_becomes_a_paragraph() {
    let texts = [
        "",
        "single line",
        "a\nb",
        "trailing newline\n",
        "\n\n\n",
        "mixed ₹ and € and 日本\nsecond",
    ];

    for text in texts {
        let document = PlanDocument::from_plan_text(text);
        assert_eq!(
            document.paragraph_count(),
            text.split('\n').count(),
            "text: {:?}",
            text
        );
    }
}

#[test]
fn test_non_latin1_text_always_renders() {
    let text = "Emoji 🎯🏠💰\nCJK 計画\nArabic خطة\nMath ∑∫√\nRupee ₹₹₹";
    let bytes = render_plan_pdf(text);
    assert!(!bytes.is_empty());

    let document = PlanDocument::from_plan_text(text);
    assert_eq!(document.paragraphs()[4], b"Rupee INR INR INR ".to_vec());
    assert!(document
        .paragraphs()
        .iter()
        .flatten()
        .all(|b| *b != 0));
}

#[test]
fn test_long_plan_spans_multiple_pages() {
    let text = (1..=80)
        .map(|i| {
            format!(
                "Month {}: invest a little more than last month and keep an emergency fund",
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let pdf = String::from_utf8_lossy(&render_plan_pdf(&text)).to_string();
    let pages = pdf.matches("/Type /Page ").count();
    assert!(pages > 2, "expected several pages, got {}", pages);
    assert_eq!(pdf.matches("(Financial Goal Plan) Tj").count(), pages);
}

#[test]
fn test_zero_income_and_expenses_chart() {
    let chart = BreakdownChart::new(0.0, 0.0);
    assert!(chart.is_degenerate());
    assert!(chart.to_svg().starts_with("<svg"));
}

#[test]
fn test_download_link_round_trips_pdf() {
    use base64::Engine;

    let mut session = PlanSession::new();
    session.set_plan("Plan body".to_string());
    let link = session.download_link().unwrap();

    let encoded = link
        .data_uri()
        .strip_prefix("data:application/pdf;base64,")
        .unwrap()
        .to_string();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    assert_eq!(decoded, link.bytes());
    assert_eq!(link.file_name(), PDF_FILE_NAME);
}
