//! LLM weight estimator (Anthropic Messages API)
//!
//! Last resort for measurements nothing else can convert, e.g. "1 handful
//! spinach". The model is asked for a bare JSON object; anything around it
//! is ignored.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::DEFAULT_ESTIMATOR_URL;
use crate::models::Confidence;

use super::{CollaboratorError, WeightEstimate, WeightEstimator};

const SERVICE: &str = "Anthropic";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 256;

pub struct LlmWeightEstimator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EstimateReply {
    grams: Option<f64>,
    #[serde(default)]
    confidence: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

impl LlmWeightEstimator {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model,
            url: DEFAULT_ESTIMATOR_URL.to_string(),
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

fn build_prompt(ingredient: &str, quantity: f64, unit: &str) -> String {
    format!(
        "Estimate the weight in grams for this ingredient measurement:\n\
         Ingredient: {ingredient}\n\
         Amount: {quantity} {unit}\n\n\
         Consider typical sizes and densities for this ingredient.\n\n\
         Respond with JSON only:\n\
         {{\"grams\": <number>, \"confidence\": \"high\"|\"medium\"|\"low\", \"reasoning\": \"<brief explanation>\"}}"
    )
}

/// First balanced `{...}` in `text`, honoring string literals
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse the model's reply text into an estimate
fn parse_estimate(text: &str) -> Result<Option<WeightEstimate>, CollaboratorError> {
    let Some(object) = extract_json_object(text) else {
        return Err(CollaboratorError::Parse {
            service: SERVICE,
            message: "no JSON object in reply".to_string(),
        });
    };

    let reply: EstimateReply = serde_json::from_str(object).map_err(|e| CollaboratorError::Parse {
        service: SERVICE,
        message: e.to_string(),
    })?;

    let Some(grams) = reply.grams.filter(|g| g.is_finite() && *g >= 0.0) else {
        return Ok(None);
    };

    Ok(Some(WeightEstimate {
        grams,
        confidence: reply
            .confidence
            .as_deref()
            .and_then(Confidence::from_str)
            .unwrap_or(Confidence::Low),
        reasoning: reply.reasoning.unwrap_or_default(),
    }))
}

#[async_trait]
impl WeightEstimator for LlmWeightEstimator {
    async fn estimate(
        &self,
        ingredient: &str,
        quantity: f64,
        unit: &str,
    ) -> Result<Option<WeightEstimate>, CollaboratorError> {
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "temperature": 0.1,
            "messages": [
                { "role": "user", "content": build_prompt(ingredient, quantity, unit) }
            ]
        });

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CollaboratorError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let reply: MessagesResponse = response.json().await?;
        let Some(text) = reply.content.into_iter().find_map(|block| block.text) else {
            return Ok(None);
        };

        debug!("Weight estimate reply for {} {} {}: {}", quantity, unit, ingredient, text);
        parse_estimate(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object() {
        assert_eq!(
            extract_json_object("Sure! {\"grams\": 30} Hope that helps."),
            Some("{\"grams\": 30}")
        );
        assert_eq!(
            extract_json_object("{\"reasoning\": \"a } in text\", \"n\": {\"x\": 1}}"),
            Some("{\"reasoning\": \"a } in text\", \"n\": {\"x\": 1}}")
        );
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{\"grams\": 30"), None);
    }

    #[test]
    fn test_parse_estimate() {
        let text = "```json\n{\"grams\": 30, \"confidence\": \"medium\", \"reasoning\": \"a handful of spinach\"}\n```";
        let estimate = parse_estimate(text).unwrap().unwrap();
        assert!((estimate.grams - 30.0).abs() < 0.001);
        assert_eq!(estimate.confidence, Confidence::Medium);
        assert_eq!(estimate.reasoning, "a handful of spinach");
    }

    #[test]
    fn test_confidence_defaults_to_low() {
        let estimate = parse_estimate("{\"grams\": 12.5, \"confidence\": \"certain\"}")
            .unwrap()
            .unwrap();
        assert_eq!(estimate.confidence, Confidence::Low);
        assert_eq!(estimate.reasoning, "");
    }

    #[test]
    fn test_unusable_replies() {
        assert!(parse_estimate("I cannot estimate that.").is_err());
        assert!(parse_estimate("{\"grams\": \"lots\"}").is_err());
        assert!(parse_estimate("{\"grams\": -4}").unwrap().is_none());
        assert!(parse_estimate("{\"confidence\": \"low\"}").unwrap().is_none());
    }

    #[test]
    fn test_prompt_names_measurement() {
        let prompt = build_prompt("spinach", 1.0, "handful");
        assert!(prompt.contains("Ingredient: spinach"));
        assert!(prompt.contains("Amount: 1 handful"));
        assert!(prompt.contains("\"grams\": <number>"));
    }

    #[test]
    fn test_messages_response_text() {
        let reply: MessagesResponse = serde_json::from_value(serde_json::json!({
            "id": "msg_01",
            "type": "message",
            "content": [{ "type": "text", "text": "{\"grams\": 5}" }]
        }))
        .unwrap();
        assert_eq!(reply.content[0].text.as_deref(), Some("{\"grams\": 5}"));
    }

    #[tokio::test]
    async fn test_with_url_targets_endpoint() {
        let estimator = LlmWeightEstimator::new("sk-test".to_string(), "m".to_string(), Duration::from_secs(1))
            .unwrap();
        assert_eq!(estimator.url, DEFAULT_ESTIMATOR_URL);

        let estimator = estimator.with_url("not a url");
        assert_eq!(estimator.url, "not a url");
        let err = estimator.estimate("spinach", 1.0, "handful").await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Http(_)));
    }
}
