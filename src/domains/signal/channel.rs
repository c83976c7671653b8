use crate::common::{SignalError, SignalResult};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Port for the duplex named-stream channel the simulator exposes.
///
/// Implementations write to the outbound stream and read from the inbound
/// stream. Neither call blocks waiting for the peer.
#[async_trait]
pub trait SignalChannel: Send {
    /// Writes one payload to the outbound stream. No acknowledgement.
    async fn send(&mut self, payload: &[u8]) -> SignalResult<()>;

    /// A single read attempt on the inbound stream.
    async fn try_recv(&mut self) -> SignalResult<Option<Vec<u8>>>;
}

/// How long and how often to poll for a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// `None` waits forever.
    pub timeout: Option<Duration>,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl PollPolicy {
    pub fn unbounded() -> Self {
        Self {
            timeout: None,
            ..Self::default()
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::default()
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(2)),
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(50),
        }
    }
}

/// Polls `channel` until a non-empty payload arrives or the policy's timeout expires.
pub async fn poll_reply<C>(channel: &mut C, policy: &PollPolicy) -> SignalResult<Vec<u8>>
where
    C: SignalChannel + ?Sized,
{
    let started = Instant::now();
    let mut backoff = policy.initial_backoff;
    loop {
        if let Some(payload) = channel.try_recv().await? {
            if !payload.is_empty() {
                return Ok(payload);
            }
        }

        let mut pause = backoff;
        if let Some(timeout) = policy.timeout {
            let waited = started.elapsed();
            if waited >= timeout {
                return Err(SignalError::Timeout { waited });
            }
            pause = pause.min(timeout - waited);
        }
        sleep(pause).await;
        backoff = (backoff * 2).min(policy.max_backoff.max(policy.initial_backoff));
    }
}
