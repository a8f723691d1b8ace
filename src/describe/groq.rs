use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde_json::{json, Value};

use super::{DescribeError, DescribeService};
use crate::capture::ImageBlob;

pub struct GroqVisionClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GroqVisionClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/v1/chat/completions",
            self.endpoint.trim_end_matches('/'),
        )
    }

    fn build_request_body(&self, image_data: &[u8], prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": format!("data:image/jpeg;base64,{}", BASE64.encode(image_data))
                            }
                        }
                    ]
                }
            ],
            "max_tokens": 300
        })
    }
}

/// Pull the description text out of a chat-completions response body.
fn extract_description(body: &Value) -> Result<String, DescribeError> {
    let text = body
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            DescribeError::InvalidResponse("no choices[0].message.content in response".into())
        })?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DescribeError::InvalidResponse(
            "model returned an empty description".into(),
        ));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl DescribeService for GroqVisionClient {
    async fn describe(&self, image: &ImageBlob, prompt: &str) -> Result<String, DescribeError> {
        let body = self.build_request_body(&image.data, prompt);

        let response = self
            .client
            .post(self.completions_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| DescribeError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".into());

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(DescribeError::AuthError(error_body));
            }
            if status.as_u16() == 429 {
                return Err(DescribeError::RateLimited {
                    retry_after_ms: 1000,
                });
            }
            return Err(DescribeError::ConnectionError(format!(
                "HTTP {}: {}",
                status, error_body
            )));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| DescribeError::InvalidResponse(format!("invalid JSON: {}", e)))?;

        extract_description(&parsed)
    }

    fn name(&self) -> &str {
        "groq-vision"
    }
}
