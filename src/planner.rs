use crate::chart::BreakdownChart;
use crate::error::{PlannerError, Result};
use crate::generator::PlanGenerator;
use crate::prompt::build_plan_prompt;
use crate::schema::PlanRequest;
use crate::session::PlanSession;
use log::{debug, info, warn};

pub const VALIDATION_WARNING: &str = "Please fill all required fields.";
pub const SUCCESS_MESSAGE: &str = "Plan generated!";

/// Drives one generate or regenerate interaction against a [`PlanGenerator`].
pub struct FinancialPlanner<G> {
    generator: G,
}

impl<G: PlanGenerator> FinancialPlanner<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Validates the request, asks the generator for a plan and stores it in
    /// `session`, replacing any previous plan. An invalid request never
    /// reaches the generator and leaves the session untouched.
    pub async fn generate<'s>(
        &self,
        session: &'s mut PlanSession,
        request: &PlanRequest,
    ) -> Result<&'s str> {
        if let Err(failure) = request.validate() {
            warn!("{} ({})", VALIDATION_WARNING, failure);
            return Err(PlannerError::Validation(failure));
        }

        let prompt = build_plan_prompt(request);
        debug!(
            "Generating {} plan in a {} tone",
            request.format.label(),
            request.tone.label()
        );

        let plan = self.generator.generate(&prompt).await?;
        info!("{} ({} chars)", SUCCESS_MESSAGE, plan.len());

        Ok(session.set_plan(plan))
    }

    /// Produces a fresh plan for an existing session, typically after the
    /// tone or format changed. Fails with [`PlannerError::NoPlan`] when nothing
    /// has been generated yet.
    pub async fn regenerate<'s>(
        &self,
        session: &'s mut PlanSession,
        request: &PlanRequest,
    ) -> Result<&'s str> {
        if !session.has_plan() {
            return Err(PlannerError::NoPlan);
        }
        self.generate(session, request).await
    }
}

/// Chart for the request's income breakdown.
pub fn income_breakdown(request: &PlanRequest) -> BreakdownChart {
    BreakdownChart::new(request.income, request.expenses)
}
