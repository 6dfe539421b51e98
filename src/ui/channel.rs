//! Channel-backed proxy.
//!
//! The engine task sends a [`UiRequest`] per display call; the presentation
//! task renders it and answers through the request's one-shot reply
//! handle. Each request resolves at most once: answering again reports
//! [`UiError::AlreadyResolved`], answering with an id that was not offered
//! reports [`UiError::UnknownChoice`] and leaves the request open.
//!
//! If the presentation side is gone (receiver dropped, or a request dropped
//! unanswered) the engine resolves with the safe default and logs a
//! warning rather than waiting forever.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use super::{default_choice, Choice, ChoiceId, ChoiceSet, GuiActionProxy};

/// Errors answering a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("{0} was not offered")]
    UnknownChoice(ChoiceId),

    #[error("request already resolved")]
    AlreadyResolved,

    #[error("engine is no longer waiting for this request")]
    EngineGone,
}

/// A message awaiting acknowledgement.
#[derive(Debug)]
pub struct MessageRequest {
    pub message: String,
    pub confirm: String,
    pub icon: Option<String>,
    pub fx: Option<String>,
    ack: Option<oneshot::Sender<()>>,
}

impl MessageRequest {
    /// Acknowledge the message.
    pub fn acknowledge(&mut self) -> Result<(), UiError> {
        let ack = self.ack.take().ok_or(UiError::AlreadyResolved)?;
        ack.send(()).map_err(|_| UiError::EngineGone)
    }

    /// Has this request been answered?
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.ack.is_none()
    }
}

/// A choice set awaiting an answer.
#[derive(Debug)]
pub struct ChoiceRequest {
    pub message: String,
    pub choices: ChoiceSet,
    pub icon: Option<String>,
    reply: Option<oneshot::Sender<ChoiceId>>,
}

impl ChoiceRequest {
    /// Answer with one of the offered ids.
    pub fn respond(&mut self, id: ChoiceId) -> Result<(), UiError> {
        if self.reply.is_none() {
            return Err(UiError::AlreadyResolved);
        }
        if !self.choices.iter().any(|c| c.id == id) {
            return Err(UiError::UnknownChoice(id));
        }
        let reply = self.reply.take().ok_or(UiError::AlreadyResolved)?;
        reply.send(id).map_err(|_| UiError::EngineGone)
    }

    /// Has this request been answered?
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.reply.is_none()
    }
}

/// A display request from the engine.
#[derive(Debug)]
pub enum UiRequest {
    Message(MessageRequest),
    Choices(ChoiceRequest),
}

/// Proxy that forwards display calls over a channel.
#[derive(Clone, Debug)]
pub struct ChannelProxy {
    requests: mpsc::Sender<UiRequest>,
}

/// Create a proxy and the receiver the presentation task reads from.
pub fn channel(buffer: usize) -> (ChannelProxy, mpsc::Receiver<UiRequest>) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (ChannelProxy { requests: tx }, rx)
}

#[async_trait]
impl GuiActionProxy for ChannelProxy {
    async fn display_message(
        &mut self,
        message: &str,
        confirm: &str,
        icon: Option<&str>,
        fx: Option<&str>,
    ) {
        let (tx, rx) = oneshot::channel();
        let request = UiRequest::Message(MessageRequest {
            message: message.to_string(),
            confirm: confirm.to_string(),
            icon: icon.map(str::to_string),
            fx: fx.map(str::to_string),
            ack: Some(tx),
        });

        if self.requests.send(request).await.is_err() {
            warn!("presentation channel closed, auto-acknowledging message");
            return;
        }
        if rx.await.is_err() {
            warn!("message request dropped unanswered, auto-acknowledging");
        }
    }

    async fn display_choices(
        &mut self,
        message: &str,
        choices: &[Choice],
        icon: Option<&str>,
    ) -> ChoiceId {
        let fallback = default_choice(choices);
        let (tx, rx) = oneshot::channel();
        let request = UiRequest::Choices(ChoiceRequest {
            message: message.to_string(),
            choices: choices.iter().cloned().collect(),
            icon: icon.map(str::to_string),
            reply: Some(tx),
        });

        if self.requests.send(request).await.is_err() {
            warn!(%fallback, "presentation channel closed, taking default choice");
            return fallback;
        }
        match rx.await {
            Ok(id) => id,
            Err(_) => {
                warn!(%fallback, "choice request dropped unanswered, taking default choice");
                fallback
            }
        }
    }
}
