use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Concierge, OFFLINE_FALLBACK};

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Client for the hosted text-completion service.
pub struct GenerativeConcierge {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl GenerativeConcierge {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    fn build_prompt(user_query: &str, menu_context: &str) -> String {
        format!(
            "You are the AI Concierge for \"daymaker2day\", a futuristic micro-service booking app.\n\
             We offer 25-minute and 55-minute Zoom sessions.\n\n\
             Here is our menu:\n{menu_context}\n\n\
             Your task:\n\
             1. Analyze the user's mood or request.\n\
             2. Recommend 1-3 specific services from the list above that would \"make their day\".\n\
             3. Be brief, friendly, and futuristic in tone.\n\
             4. Do not invent services not on the list.\n\n\
             User Query: \"{user_query}\""
        )
    }

    async fn generate(&self, prompt: String, api_key: &str) -> anyhow::Result<Option<String>> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.api_url.as_str())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text);
        Ok(text)
    }
}

#[async_trait]
impl Concierge for GenerativeConcierge {
    async fn recommend(&self, user_query: &str, menu_context: &str) -> String {
        let Some(api_key) = self.api_key.clone() else {
            warn!("Concierge API key is missing, AI features are disabled");
            return OFFLINE_FALLBACK.to_string();
        };

        let prompt = Self::build_prompt(user_query, menu_context);
        match self.generate(prompt, &api_key).await {
            Ok(Some(text)) => text,
            Ok(None) => "I couldn't generate a response.".to_string(),
            Err(err) => {
                // Diagnostics stay in the logs; the user gets the fallback.
                warn!("Concierge request failed: {err:#}");
                OFFLINE_FALLBACK.to_string()
            }
        }
    }
}
