//! Wire types for the OpenAI-compatible chat completions API.
//!
//! Only the fields SafeHaven sends or reads are modelled.

use serde::{Deserialize, Serialize};

use safehaven_types::chat::{ChatRole, ModelRequest};

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub stream: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatCompletionRequest {
    /// Streaming request: system instruction first, then the conversation.
    pub fn streaming(model: &str, request: &ModelRequest) -> Self {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(WireMessage {
            role: "system",
            content: request.system_instruction.clone(),
        });
        messages.extend(request.messages.iter().map(|m| WireMessage {
            role: match m.role {
                ChatRole::User => "user",
                ChatRole::Model => "assistant",
            },
            content: m.text.clone(),
        }));

        Self {
            model: model.to_string(),
            messages,
            stream: true,
        }
    }
}

/// One `data:` payload of the completion stream.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}
