//! Chat session state machine.

use std::ops::{Deref, DerefMut};

use async_stream::stream;
use futures_util::{Stream, StreamExt};
use tracing::{debug, info, warn};

use safehaven_types::chat::{ChatMessage, ChatRole, FailureReason, ModelRequest, SessionState};
use safehaven_types::config::ChatConfig;
use safehaven_types::error::{ErrorKind, ModelError};

use super::model::{CredentialSource, ModelClient, ModelConnector};
use super::persona;

/// Per-session constants, fixed when the manager is created.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub model: String,
    pub system_instruction: String,
    pub greeting: String,
}

impl SessionSettings {
    /// Haven persona for the given model.
    pub fn haven(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: persona::SYSTEM_INSTRUCTION.to_string(),
            greeting: persona::GREETING.to_string(),
        }
    }
}

impl From<&ChatConfig> for SessionSettings {
    fn from(config: &ChatConfig) -> Self {
        Self::haven(&config.model)
    }
}

/// Owns one conversation with the model backend.
///
/// The backend client is created lazily on first use. `send_turn` borrows
/// the manager mutably for as long as its stream lives, so at most one turn
/// is ever in flight.
pub struct ChatSessionManager<C: ModelConnector, S: CredentialSource> {
    connector: C,
    credentials: S,
    settings: SessionSettings,
    client: Option<C::Client>,
    history: Vec<ChatMessage>,
    state: SessionState,
}

impl<C: ModelConnector, S: CredentialSource> ChatSessionManager<C, S> {
    pub fn new(connector: C, credentials: S, settings: SessionSettings) -> Self {
        let history = vec![ChatMessage::model(settings.greeting.clone())];
        Self {
            connector,
            credentials,
            settings,
            client: None,
            history,
            state: SessionState::Uninitialized,
        }
    }

    /// Messages so far, oldest first. Starts with the greeting.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Connect to the backend if not already connected.
    ///
    /// Safe to call speculatively; a second call on a live session changes
    /// nothing.
    pub fn initialize(&mut self) -> Result<(), ModelError> {
        if self.client.is_some() {
            return Ok(());
        }

        let Some(api_key) = self.credentials.resolve() else {
            if self.state == SessionState::Uninitialized {
                self.state = SessionState::Failed(FailureReason::MissingCredential);
            }
            return Err(ModelError::MissingCredential(self.credentials.name().to_string()));
        };

        let client = self.connector.connect(api_key, &self.settings.model)?;
        info!(model = %self.settings.model, "Chat session connected");
        self.client = Some(client);
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Drop the backend session and start a fresh conversation.
    pub fn reset(&mut self) {
        self.client = None;
        self.history = vec![ChatMessage::model(self.settings.greeting.clone())];
        self.state = SessionState::Uninitialized;
        debug!("Chat session reset");
    }

    /// Send one user message and stream the reply.
    ///
    /// Each item is the model message as accumulated so far; the same text
    /// is kept as the last history entry. On failure the stream yields one
    /// error message and ends. Blank input is ignored.
    pub fn send_turn<'a>(&'a mut self, text: &'a str) -> impl Stream<Item = ChatMessage> + 'a {
        stream! {
            if text.trim().is_empty() {
                debug!("Ignoring blank chat input");
                return;
            }

            let mut turn = TurnGuard { manager: self };
            turn.history.push(ChatMessage::user(text));
            let request = turn.build_request();
            turn.history.push(ChatMessage::model(String::new()));
            turn.state = SessionState::Sending;

            if let Err(err) = turn.initialize() {
                let (reason, message) = match err.kind() {
                    ErrorKind::Configuration => (
                        FailureReason::MissingCredential,
                        persona::configuration_message(turn.credentials.name()),
                    ),
                    _ => (FailureReason::Connectivity, persona::CONNECTIVITY_MESSAGE.to_string()),
                };
                warn!(error = %err, "Chat session could not be initialized");
                yield turn.fail_turn(reason, message);
                return;
            }

            let opened = turn.client.as_ref().map(|client| {
                debug!(backend = client.name(), messages = request.messages.len(), "Sending chat turn");
                client.stream(request)
            });
            let Some(mut chunks) = opened else {
                yield turn.fail_turn(
                    FailureReason::Connectivity,
                    persona::CONNECTIVITY_MESSAGE.to_string(),
                );
                return;
            };
            turn.state = SessionState::Streaming;

            let mut full = String::new();
            while let Some(next) = chunks.next().await {
                match next {
                    Ok(chunk) => {
                        if chunk.is_empty() {
                            continue;
                        }
                        full.push_str(&chunk);
                        if let Some(last) = turn.history.last_mut() {
                            last.text.clone_from(&full);
                        }
                        yield ChatMessage::model(full.clone());
                    }
                    Err(err) => {
                        warn!(error = %err, received = full.len(), "Chat stream failed");
                        yield turn.fail_turn(
                            FailureReason::Connectivity,
                            persona::CONNECTIVITY_MESSAGE.to_string(),
                        );
                        return;
                    }
                }
            }

            turn.state = SessionState::Ready;
            debug!(chars = full.len(), "Chat turn complete");
        }
    }

    /// Settle a turn whose stream was dropped before it finished.
    ///
    /// Whatever text already arrived stays in history; an empty placeholder
    /// is removed.
    fn abandon_turn(&mut self) {
        if !matches!(self.state, SessionState::Sending | SessionState::Streaming) {
            return;
        }
        self.pop_placeholder();
        self.state = SessionState::Ready;
        debug!(messages = self.history.len(), "Chat turn abandoned before completion");
    }

    fn pop_placeholder(&mut self) {
        if self
            .history
            .last()
            .is_some_and(|m| m.role == ChatRole::Model && !m.is_error && m.text.is_empty())
        {
            self.history.pop();
        }
    }

    /// Conversation sent to the backend: everything before the first user
    /// message (the greeting) is skipped, as are error and empty messages.
    fn build_request(&self) -> ModelRequest {
        let messages = self
            .history
            .iter()
            .skip_while(|m| m.role != ChatRole::User)
            .filter(|m| !m.is_error && !m.text.is_empty())
            .cloned()
            .collect();

        ModelRequest {
            model: self.settings.model.clone(),
            system_instruction: self.settings.system_instruction.clone(),
            messages,
        }
    }

    /// Record a failed turn and return the error message appended.
    fn fail_turn(&mut self, reason: FailureReason, text: String) -> ChatMessage {
        self.pop_placeholder();
        let message = ChatMessage::error(text);
        self.history.push(message.clone());
        self.state = SessionState::Failed(reason);
        message
    }
}

/// Exclusive access to the manager for the length of one turn.
///
/// Lives inside the turn's stream, so dropping the stream early drops the
/// guard and puts the session back in a usable state.
struct TurnGuard<'a, C: ModelConnector, S: CredentialSource> {
    manager: &'a mut ChatSessionManager<C, S>,
}

impl<C: ModelConnector, S: CredentialSource> Deref for TurnGuard<'_, C, S> {
    type Target = ChatSessionManager<C, S>;

    fn deref(&self) -> &Self::Target {
        self.manager
    }
}

impl<C: ModelConnector, S: CredentialSource> DerefMut for TurnGuard<'_, C, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.manager
    }
}

impl<C: ModelConnector, S: CredentialSource> Drop for TurnGuard<'_, C, S> {
    fn drop(&mut self) {
        self.manager.abandon_turn();
    }
}
