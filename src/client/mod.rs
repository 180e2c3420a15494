pub mod http;
pub mod render;
pub mod terminal;

use crate::models::chat::{ Conversation, Message, MessageId };

use std::sync::atomic::{ AtomicBool, Ordering };
use std::sync::Arc;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use log::{ debug, warn };

pub use self::http::HttpBackend;

pub const SOMETHING_WENT_WRONG: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("could not reach the proxy: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("proxy answered with status {status}")]
    Status {
        status: u16,
        detail: Option<String>,
    },

    #[error("proxy reply could not be decoded: {0}")]
    Decode(String),
}

impl BackendError {
    /// Error text carried by the proxy response, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Transport between the conversation and the completion proxy.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, text: &str) -> Result<String, BackendError>;
}

#[async_trait]
impl<T: ChatBackend + ?Sized> ChatBackend for Arc<T> {
    async fn send(&self, text: &str) -> Result<String, BackendError> {
        (**self).send(text).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming.
    Ignored,
    /// A previous submission is still in flight.
    Busy,
    Replied(MessageId),
    Failed(MessageId),
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Client-side conversation state: messages, input buffer and loading flag.
///
/// Only one submission can be in flight at a time; while it is pending the
/// session behaves like a disabled input and refuses new submissions.
pub struct ChatSession<B> {
    backend: B,
    conversation: Mutex<Conversation>,
    input: Mutex<String>,
    loading: AtomicBool,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            conversation: Mutex::new(Conversation::new()),
            input: Mutex::new(String::new()),
            loading: AtomicBool::new(false),
        }
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        *self.input.lock().await = text.into();
    }

    pub async fn input(&self) -> String {
        self.input.lock().await.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Vec<Message> {
        self.conversation.lock().await.messages().to_vec()
    }

    pub async fn view(&self, width: usize, height: usize) -> Vec<String> {
        let messages = self.snapshot().await;
        render::render_transcript(&messages, self.is_loading(), width, height)
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let text = {
            let mut input = self.input.lock().await;
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return SubmitOutcome::Ignored;
            }
            if self.loading
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                return SubmitOutcome::Busy;
            }
            let text = trimmed.to_string();
            input.clear();
            text
        };
        let _loading = LoadingGuard(&self.loading);

        self.conversation.lock().await.push_user(text.as_str());

        match self.backend.send(&text).await {
            Ok(reply) => {
                debug!("Proxy replied ({} chars)", reply.chars().count());
                let id = self.conversation.lock().await.push_bot(reply);
                SubmitOutcome::Replied(id)
            }
            Err(e) => {
                warn!("Error from chat api: {}", e);
                let text = e.detail().unwrap_or(SOMETHING_WENT_WRONG).to_string();
                let id = self.conversation.lock().await.push_bot(text);
                SubmitOutcome::Failed(id)
            }
        }
    }
}
