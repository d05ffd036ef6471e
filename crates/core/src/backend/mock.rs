use super::{BackendError, GenerationReply, GenerationRequest, GenerativeBackend};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

type Scripted = Result<GenerationReply, BackendError>;

/// In-memory backend that replays scripted replies and records every request.
///
/// Queued replies are consumed first, in order. Once the queue is empty the
/// fallback reply is returned for every further call.
pub struct MockBackend {
    queue: Mutex<VecDeque<Scripted>>,
    fallback: Scripted,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockBackend {
    /// Always answers with `reply`.
    pub fn replying(reply: GenerationReply) -> Self {
        Self::with_fallback(Ok(reply))
    }

    /// Always answers with a single text part.
    pub fn replying_text(text: impl Into<String>) -> Self {
        Self::replying(GenerationReply::text(text))
    }

    /// Always fails with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self::with_fallback(Err(error))
    }

    /// Answers with each reply in turn, then keeps repeating the last one.
    pub fn sequence(replies: Vec<GenerationReply>) -> Self {
        let fallback = replies.last().cloned().unwrap_or_default();
        let mock = Self::with_fallback(Ok(fallback));
        for reply in replies {
            mock.push(Ok(reply));
        }
        mock
    }

    fn with_fallback(fallback: Scripted) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues one reply ahead of the fallback.
    pub fn push(&self, reply: Scripted) {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(reply);
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationReply, BackendError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        let next = self
            .queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}
