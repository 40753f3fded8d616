use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::Config;

/// Spoken when the service replies without a usable answer text.
pub const MISSING_ANSWER_FALLBACK: &str = "I'm not sure how to respond.";

/// Spoken when the round trip to the service fails outright.
pub const REQUEST_FAILED_FALLBACK: &str = "Sorry, I couldn't process your request.";

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnswerResponse {
    answer: Option<String>,
}

/// Build the HTTP client shared across requests. The timeout caps the whole
/// round trip so a stalled upstream cannot hold a voice session hostage.
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.gemini_timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

/// Ask the Gemini service a free-form question and return the text to speak.
///
/// This never fails: transport errors, non-success statuses, and unparseable
/// bodies are logged and folded into a spoken fallback, and a well-formed
/// reply without usable answer text gets its own fallback line.
pub async fn ask(client: &reqwest::Client, config: &Config, question: &str) -> String {
    match try_ask(client, config, question).await {
        Ok(answer) => answer,
        Err(e) => {
            error!("Gemini request failed: {}", e);
            REQUEST_FAILED_FALLBACK.to_string()
        }
    }
}

async fn try_ask(client: &reqwest::Client, config: &Config, question: &str) -> Result<String> {
    let request = AnswerRequest { prompt: question };

    let response = client
        .post(&config.gemini_endpoint)
        .header("Authorization", format!("Bearer {}", config.gemini_api_key))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .context("Failed to send request to Gemini service")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Gemini service error ({}): {}", status, body);
    }

    let answer_response: AnswerResponse = response
        .json()
        .await
        .context("Failed to parse Gemini response")?;

    let answer = answer_response
        .answer
        .filter(|answer| !answer.is_empty())
        .unwrap_or_else(|| MISSING_ANSWER_FALLBACK.to_string());

    Ok(answer)
}
