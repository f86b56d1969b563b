use crate::document::{DownloadLink, PlanDocument};
use crate::error::{PlannerError, Result};

/// Per-user state between interactions: the plan currently on display.
///
/// Each generation replaces the stored text; nothing is kept from earlier runs.
#[derive(Debug, Clone, Default)]
pub struct PlanSession {
    plan: Option<String>,
    generations: usize,
}

impl PlanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref().filter(|plan| !plan.is_empty())
    }

    pub fn has_plan(&self) -> bool {
        self.plan().is_some()
    }

    pub fn set_plan(&mut self, plan: String) -> &str {
        self.generations += 1;
        self.plan.insert(plan).as_str()
    }

    /// Number of plans stored over the life of the session.
    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn export(&self) -> Result<PlanDocument> {
        self.plan()
            .map(PlanDocument::from_plan_text)
            .ok_or(PlannerError::NoPlan)
    }

    pub fn download_link(&self) -> Result<DownloadLink> {
        Ok(DownloadLink::from_document(&self.export()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_plan_overwrites() {
        let mut session = PlanSession::new();
        assert!(!session.has_plan());

        session.set_plan("first".to_string());
        session.set_plan("second".to_string());

        assert_eq!(session.plan(), Some("second"));
        assert_eq!(session.generations(), 2);
    }

    #[test]
    fn test_export_requires_plan() {
        let mut session = PlanSession::new();
        assert!(matches!(session.export(), Err(PlannerError::NoPlan)));

        session.set_plan(String::new());
        assert!(matches!(session.export(), Err(PlannerError::NoPlan)));

        session.set_plan("line one\nline two".to_string());
        assert_eq!(session.export().unwrap().paragraph_count(), 2);
        assert!(session
            .download_link()
            .unwrap()
            .data_uri()
            .starts_with("data:application/pdf;base64,"));
    }
}
