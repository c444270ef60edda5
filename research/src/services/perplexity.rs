//! Perplexity chat-completions client shared by discovery and research

use crate::error::ApiFailure;

/// Thin client over the Perplexity chat-completions endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct PerplexityClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl PerplexityClient {
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Send one single-message completion request and return the answer
    /// content verbatim.
    pub async fn ask(&self, prompt: &str, temperature: f32) -> Result<String, ApiFailure> {
        let request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": temperature,
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ApiFailure::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return match response.status().as_u16() {
                401 => Err(ApiFailure::AuthenticationFailed),
                429 => Err(ApiFailure::RateLimitExceeded),
                503 => Err(ApiFailure::ServiceUnavailable),
                _ => Err(ApiFailure::ServerError(response.status().to_string())),
            };
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiFailure::InvalidResponse(format!("failed to parse response: {e}")))?;

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| ApiFailure::InvalidResponse("no content in response".to_string()))?;

        Ok(content.to_string())
    }
}
