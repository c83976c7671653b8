use crate::common::SignalResult;
use crate::domains::signal::SignalChannel;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// In-memory signal channel for tests and offline runs.
///
/// Scripted replies are released one per `send`, the way a simulator answers
/// each request. Clones share the same buffers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChannel {
    inner: Arc<Mutex<Buffers>>,
}

#[derive(Debug, Default)]
struct Buffers {
    sent: Vec<Vec<u8>>,
    scripted: VecDeque<Vec<u8>>,
    inbox: VecDeque<Vec<u8>>,
}

impl InMemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply to be delivered after the next unanswered `send`.
    pub fn script_reply(&self, payload: impl Into<Vec<u8>>) {
        self.buffers().scripted.push_back(payload.into());
    }

    /// Makes a payload readable immediately, without a request.
    pub fn inject_reply(&self, payload: impl Into<Vec<u8>>) {
        self.buffers().inbox.push_back(payload.into());
    }

    /// Every payload sent so far, oldest first.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.buffers().sent.clone()
    }

    pub fn pending_replies(&self) -> usize {
        let buffers = self.buffers();
        buffers.scripted.len() + buffers.inbox.len()
    }

    fn buffers(&self) -> std::sync::MutexGuard<'_, Buffers> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SignalChannel for InMemoryChannel {
    async fn send(&mut self, payload: &[u8]) -> SignalResult<()> {
        let mut buffers = self.buffers();
        buffers.sent.push(payload.to_vec());
        if let Some(reply) = buffers.scripted.pop_front() {
            buffers.inbox.push_back(reply);
        }
        Ok(())
    }

    async fn try_recv(&mut self) -> SignalResult<Option<Vec<u8>>> {
        Ok(self.buffers().inbox.pop_front())
    }
}
