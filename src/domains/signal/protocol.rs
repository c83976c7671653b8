use super::channel::{poll_reply, PollPolicy, SignalChannel};
use super::codec::{decode_ints, encode_ints, split_reply};
use super::types::{LedColor, Motion, RobotState, SignalRequest, StateReply, Uid};
use crate::common::SignalResult;
use crate::domains::logger::DynLogger;
use tokio::sync::Mutex;

/// Where the most recent exchange on a channel got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangePhase {
    Idle,
    RequestSent,
    AwaitingReply,
    Decoded,
    Faulted,
}

struct Link<C> {
    channel: C,
    phase: ExchangePhase,
}

/// Request/reply driver for one simulator channel.
///
/// The channel carries a single unnamed reply stream, so replies can only be
/// matched to requests by order. The link mutex is held for the whole
/// drain, send, poll and decode cycle of each call.
pub struct SignalProtocol<C: SignalChannel> {
    link: Mutex<Link<C>>,
    policy: PollPolicy,
    logger: DynLogger,
}

impl<C: SignalChannel> SignalProtocol<C> {
    pub fn new(channel: C, policy: PollPolicy, logger: DynLogger) -> Self {
        Self {
            link: Mutex::new(Link {
                channel,
                phase: ExchangePhase::Idle,
            }),
            policy,
            logger,
        }
    }

    pub async fn phase(&self) -> ExchangePhase {
        self.link.lock().await.phase
    }

    /// Gives the channel back, e.g. to close it.
    pub fn into_channel(self) -> C {
        self.link.into_inner().channel
    }

    /// Requests the current state of robot `uid`.
    ///
    /// The reply must come from `uid`; anything else is a
    /// [`ProtocolDesync`](crate::common::SignalError::ProtocolDesync).
    pub async fn get_state(&self, uid: Uid) -> SignalResult<RobotState> {
        let request = SignalRequest::get_state(uid)?;
        self.logger.debug(&format!("getState uid={}", uid));

        let mut link = self.link.lock().await;
        let outcome = match self.exchange(&mut link, &request).await {
            Ok(reply) => decode_state(&reply, uid),
            Err(e) => Err(e),
        };
        self.settle(&mut link, &outcome);

        if let Err(e) = &outcome {
            self.logger.error(&format!("getState uid={} failed: {}", uid, e));
        }
        outcome
    }

    /// Sends a motion and LED command to robot `uid`.
    ///
    /// The reply is decoded but not checked against the request.
    pub async fn set_state(&self, uid: Uid, motion: Motion, led: LedColor) -> SignalResult<()> {
        let request = SignalRequest::set_state(uid, motion, led)?;
        self.logger.debug(&format!(
            "setState uid={} motion={:?} led=[{}, {}, {}]",
            uid, motion, led.r, led.g, led.b
        ));

        let mut link = self.link.lock().await;
        let outcome = match self.exchange(&mut link, &request).await {
            Ok(reply) => decode_ints(&reply).map(|ack| {
                self.logger.debug(&format!("setState uid={} ack {:?}", uid, ack));
            }),
            Err(e) => Err(e),
        };
        self.settle(&mut link, &outcome);

        if let Err(e) = &outcome {
            self.logger.error(&format!("setState uid={} failed: {}", uid, e));
        }
        outcome
    }

    async fn exchange(&self, link: &mut Link<C>, request: &SignalRequest) -> SignalResult<Vec<u8>> {
        link.phase = ExchangePhase::Idle;
        self.drain_stale(link).await?;

        let fields = request.to_fields();
        link.channel.send(&encode_ints(&fields)).await?;
        link.phase = ExchangePhase::RequestSent;
        self.logger.debug(&format!("Sent {:?}", fields));

        link.phase = ExchangePhase::AwaitingReply;
        let reply = poll_reply(&mut link.channel, &self.policy).await?;
        self.logger.debug(&format!("Received {} bytes: {:?}", reply.len(), reply));
        Ok(reply)
    }

    async fn drain_stale(&self, link: &mut Link<C>) -> SignalResult<()> {
        while let Some(stale) = link.channel.try_recv().await? {
            if !stale.is_empty() {
                self.logger.warn(&format!(
                    "Discarding {} stale reply bytes left from an earlier exchange",
                    stale.len()
                ));
            }
        }
        Ok(())
    }

    fn settle<T>(&self, link: &mut Link<C>, outcome: &SignalResult<T>) {
        link.phase = if outcome.is_ok() {
            ExchangePhase::Decoded
        } else {
            ExchangePhase::Faulted
        };
    }
}

fn decode_state(reply: &[u8], requested: Uid) -> SignalResult<RobotState> {
    let [own, ids, distances] = split_reply(reply)?;
    let own = decode_ints(own)?;
    let ids = decode_ints(ids)?;
    let distances = decode_ints(distances)?;
    StateReply::from_segments(&own, ids, distances)?.into_state(requested)
}
