//! SSE chat completion stream to text chunks.
//!
//! Each `data:` event carries a JSON chunk; `data: [DONE]` ends the stream.
//! Only `choices[*].delta.content` text is forwarded.

use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};

use safehaven_core::chat::ChunkStream;
use safehaven_types::error::ModelError;

use super::types::{ChatCompletionChunk, ChatCompletionRequest};

const DONE_SENTINEL: &str = "[DONE]";

/// POST `body` to `url` and stream back the reply text.
///
/// Nothing is sent until the returned stream is first polled.
pub fn create_completion_stream(
    client: &reqwest::Client,
    url: &str,
    body: ChatCompletionRequest,
    api_key: &SecretString,
) -> ChunkStream {
    let client = client.clone();
    let url = url.to_string();
    let api_key = api_key.clone();

    Box::pin(async_stream::try_stream! {
        let response = client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %error_body, "Model stream API error response");
            Err::<(), _>(ModelError::Provider {
                status: status.as_u16(),
                message: error_body,
            })?;
            unreachable!();
        }

        let mut events = response.bytes_stream().eventsource();
        while let Some(event) = events.next().await {
            let event = event.map_err(|e| ModelError::Stream(format!("response body read: {e}")))?;
            let data = event.data.trim();
            if data == DONE_SENTINEL {
                break;
            }
            if data.is_empty() {
                continue;
            }

            let chunk: ChatCompletionChunk = serde_json::from_str(data)
                .map_err(|e| ModelError::Deserialization(format!("completion chunk: {e}")))?;
            for choice in chunk.choices {
                if let Some(text) = choice.delta.content.filter(|t| !t.is_empty()) {
                    yield text;
                }
            }
        }
    })
}
