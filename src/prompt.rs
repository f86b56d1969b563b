//! Instruction template sent to the text-generation service

use crate::schema::PlanRequest;

/// Sections every report must cover, in the order the model is asked for them.
pub const REPORT_SECTIONS: [&str; 5] = [
    "Savings plan",
    "Monthly/annual budget summary",
    "Investment suggestions (based on age & location)",
    "Timeline to achieve the goal",
    "Risk assessment and tips",
];

pub const CLOSING_TIPS: &str = "End with 3 practical financial tips.";

pub const INSTRUMENTS_HINT: &str =
    "Use Indian financial instruments (e.g., SIPs, PPF, FD, Mutual Funds).";

/// Builds the advisor prompt for one request. The user's values are
/// interpolated as given; nothing is escaped or summarised.
pub fn build_plan_prompt(request: &PlanRequest) -> String {
    let mut prompt = format!(
        "You are a financial advisor AI. The user has a monthly income of INR {} and monthly expenses of INR {}.\n\
         They are {} years old and live in {}.\n\
         Their financial goal is: {}.\n\n\
         Generate a {} report in a {} tone including:\n",
        request.income,
        request.expenses,
        request.age,
        request.location,
        request.goal,
        request.format.label().to_lowercase(),
        request.tone.label().to_lowercase(),
    );

    for (i, section) in REPORT_SECTIONS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, section));
    }

    prompt.push('\n');
    prompt.push_str(CLOSING_TIPS);
    prompt.push('\n');
    prompt.push_str(INSTRUMENTS_HINT);
    prompt.push('\n');

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ReportFormat, Tone};

    #[test]
    fn test_prompt_interpolates_inputs() {
        let request = PlanRequest::new(50000.0, 30000.0, "Buy a house")
            .with_age(42)
            .with_location("Pune")
            .with_tone(Tone::Motivational)
            .with_format(ReportFormat::BulletPoints);

        let prompt = build_plan_prompt(&request);

        assert!(prompt.contains("monthly income of INR 50000 and monthly expenses of INR 30000"));
        assert!(prompt.contains("They are 42 years old and live in Pune."));
        assert!(prompt.contains("Their financial goal is: Buy a house."));
        assert!(prompt.contains("Generate a bullet points report in a motivational tone"));
    }

    #[test]
    fn test_prompt_lists_every_section_in_order() {
        let prompt = build_plan_prompt(&PlanRequest::new(1.0, 1.0, "x"));

        let mut last = 0;
        for (i, section) in REPORT_SECTIONS.iter().enumerate() {
            let line = format!("{}. {}", i + 1, section);
            let pos = prompt.find(&line).expect("section missing");
            assert!(pos > last);
            last = pos;
        }

        assert!(prompt.contains(CLOSING_TIPS));
        assert!(prompt.ends_with(&format!("{}\n", INSTRUMENTS_HINT)));
    }

    #[test]
    fn test_goal_is_passed_verbatim() {
        let goal = "Retire early\nand travel with ₹ savings";
        let prompt = build_plan_prompt(&PlanRequest::new(1.0, 1.0, goal));
        assert!(prompt.contains(goal));
    }
}
