// Swarm service - drives the signal protocol and keeps the registry current
use crate::common::{ApplicationResult, SignalResult};
use crate::domains::logger::DynLogger;
use crate::domains::signal::{LedColor, Motion, RobotState, SignalChannel, SignalProtocol, Uid};
use crate::domains::swarm::RobotRegistry;

pub struct SwarmService<C: SignalChannel> {
    protocol: SignalProtocol<C>,
    registry: RobotRegistry,
    logger: DynLogger,
}

impl<C: SignalChannel> SwarmService<C> {
    pub fn new(protocol: SignalProtocol<C>, registry: RobotRegistry, logger: DynLogger) -> Self {
        Self { protocol, registry, logger }
    }

    pub fn registry(&self) -> &RobotRegistry {
        &self.registry
    }

    pub fn protocol(&self) -> &SignalProtocol<C> {
        &self.protocol
    }

    /// Fetches the state of `uid` and records it. The registry is left
    /// untouched when the exchange fails.
    pub async fn refresh(&mut self, uid: Uid) -> SignalResult<RobotState> {
        let state = self.protocol.get_state(uid).await?;
        self.logger.debug(&format!(
            "uid={} light={} neighbors={}",
            state.uid,
            state.ambient_light,
            state.distances.len()
        ));
        self.registry.update(state.clone());
        Ok(state)
    }

    /// Refreshes every known robot in ascending uid order, stopping at the first failure.
    pub async fn refresh_all(&mut self) -> SignalResult<usize> {
        let uids = self.registry.known_uids();
        for uid in &uids {
            self.refresh(*uid).await?;
        }
        self.logger.info(&format!("Refreshed {} robots", uids.len()));
        Ok(uids.len())
    }

    pub async fn command(&self, uid: Uid, motion: Motion, led: LedColor) -> SignalResult<()> {
        self.protocol.set_state(uid, motion, led).await?;
        self.logger.info(&format!("uid={} -> {:?} led=[{}, {}, {}]", uid, motion, led.r, led.g, led.b));
        Ok(())
    }

    /// One control round: refresh every known robot in ascending uid order,
    /// then send it the command `plan` picks from its fresh state.
    pub async fn run_once<F>(&mut self, plan: F) -> ApplicationResult<Vec<RobotState>>
    where
        F: Fn(&RobotState) -> (Motion, LedColor),
    {
        let uids = self.registry.known_uids();
        let mut states = Vec::with_capacity(uids.len());
        for uid in uids {
            let state = self.refresh(uid).await?;
            let (motion, led) = plan(&state);
            self.command(uid, motion, led).await?;
            states.push(state);
        }
        Ok(states)
    }

    pub fn into_parts(self) -> (SignalProtocol<C>, RobotRegistry) {
        (self.protocol, self.registry)
    }
}
