use crate::error::{PlannerError, Result};
use crate::generator::PlanGenerator;
use crate::llm::config::GeminiConfig;
use crate::llm::types::*;
use futures::future::{BoxFuture, FutureExt};
use log::{debug, info};
use reqwest::Client;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        let client = Self::new(config.api_key.clone());
        match &config.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends a single-turn text prompt and returns the model's reply verbatim.
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
        };

        debug!("Requesting {} ({} prompt chars)", model, prompt.len());
        let res = self.client.post(&url).json(&payload).send().await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            return Err(PlannerError::ExternalService(format!(
                "Gemini API Error (status {}): {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res.json().await?;
        let text = response_text(body)?;
        info!("Received plan text from {} ({} chars)", model, text.len());
        Ok(text)
    }
}

/// Joins the text parts of the first candidate.
pub fn response_text(body: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(PlannerError::ExternalService(format!(
            "Prompt was blocked: {}",
            reason
        )));
    }

    let candidate = body
        .candidates
        .ok_or_else(|| PlannerError::ExternalService("No candidates returned".to_string()))?
        .into_iter()
        .next()
        .ok_or_else(|| PlannerError::ExternalService("Empty candidates list".to_string()))?;

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    let text: String = parts
        .into_iter()
        .filter_map(|part| match part {
            Part::Text { text } => Some(text),
            Part::Other(_) => None,
        })
        .collect();

    if text.is_empty() {
        return Err(PlannerError::ExternalService(format!(
            "Model returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

/// [`PlanGenerator`] backed by one Gemini model.
#[derive(Clone)]
pub struct GeminiPlanGenerator {
    client: GeminiClient,
    model: String,
}

impl GeminiPlanGenerator {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(GeminiClient::from_config(config), config.model.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl PlanGenerator for GeminiPlanGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        self.client.generate_content(&self.model, prompt).boxed()
    }
}
