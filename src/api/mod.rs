//! Wire payloads and HTTP calls for the QA backend.
//!
//! The backend exposes `POST /api/chat` (one JSON reply per turn, no
//! streaming) and `GET /api/health`. Transport failures never reach the
//! formatter: callers substitute [`FALLBACK_REPLY`], which flows through
//! the same rendering path as any other reply.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::bot::BotKind;
use crate::utils::url::construct_api_url;

/// Substituted by the caller when the request itself fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

/// Substituted when the backend answers without a `response` field.
pub const MISSING_REPLY: &str = "I'm sorry, I couldn't process that request.";

type ApiError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "botType")]
    pub bot_type: &'static str,
}

/// Reply envelope. The backend decorates replies with scoring metadata;
/// only `response` matters to the client, the rest is tolerated.
#[derive(Deserialize)]
pub struct ChatReply {
    pub response: Option<String>,
    #[serde(rename = "type")]
    pub bot_type: Option<String>,
    pub confidence: Option<f64>,
    pub sources: Option<u32>,
    pub mode: Option<String>,
}

#[derive(Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub mode: Option<String>,
    #[serde(default)]
    pub bots: Vec<String>,
}

/// Ask `bot` one question and return the raw reply text.
pub async fn fetch_reply(
    client: &reqwest::Client,
    base_url: &str,
    message: String,
    bot: BotKind,
) -> Result<String, ApiError> {
    let chat_url = construct_api_url(base_url, "api/chat");
    let request = ChatRequest {
        message,
        bot_type: bot.wire_name(),
    };

    debug!(bot = bot.wire_name(), url = %chat_url, "sending chat request");
    let response = client
        .post(chat_url)
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!("chat request failed with status {status}: {error_text}").into());
    }

    let reply = response.json::<ChatReply>().await?;
    debug!(
        bot = reply.bot_type.as_deref(),
        confidence = reply.confidence,
        sources = reply.sources,
        mode = reply.mode.as_deref(),
        "received chat reply"
    );
    Ok(reply.response.unwrap_or_else(|| MISSING_REPLY.to_string()))
}

/// Probe the backend once at startup. Failures are reported to the user
/// as an app notice, never treated as fatal.
pub async fn fetch_health(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<HealthStatus, ApiError> {
    let health_url = construct_api_url(base_url, "api/health");
    let response = client.get(health_url).send().await?;

    if !response.status().is_success() {
        return Err(format!("health check failed with status {}", response.status()).into());
    }

    let health = response.json::<HealthStatus>().await?;
    debug!(
        status = %health.status,
        mode = health.mode.as_deref(),
        "health probe succeeded"
    );
    Ok(health)
}
