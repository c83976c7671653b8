use crate::domains::signal::{RobotState, Uid};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Observation {
    state: RobotState,
    observed_at: DateTime<Utc>,
}

/// Known robots and the last state observed for each.
///
/// Owned by a single control loop. Wrap it in [`SharedRegistry`] when
/// several tasks need it.
#[derive(Debug, Default)]
pub struct RobotRegistry {
    known: BTreeSet<Uid>,
    observations: BTreeMap<Uid, Observation>,
}

pub type SharedRegistry = Arc<RwLock<RobotRegistry>>;

impl RobotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uids<I: IntoIterator<Item = Uid>>(uids: I) -> Self {
        Self {
            known: uids.into_iter().collect(),
            observations: BTreeMap::new(),
        }
    }

    /// Returns `true` if the uid was not known yet.
    pub fn register(&mut self, uid: Uid) -> bool {
        self.known.insert(uid)
    }

    /// Drops the uid together with its last state.
    pub fn forget(&mut self, uid: Uid) -> Option<RobotState> {
        self.known.remove(&uid);
        self.observations.remove(&uid).map(|o| o.state)
    }

    pub fn update(&mut self, state: RobotState) {
        self.known.insert(state.uid);
        self.observations.insert(
            state.uid,
            Observation {
                state,
                observed_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, uid: Uid) -> Option<&RobotState> {
        self.observations.get(&uid).map(|o| &o.state)
    }

    pub fn observed_at(&self, uid: Uid) -> Option<DateTime<Utc>> {
        self.observations.get(&uid).map(|o| o.observed_at)
    }

    pub fn is_known(&self, uid: Uid) -> bool {
        self.known.contains(&uid)
    }

    /// Known uids in ascending order.
    pub fn known_uids(&self) -> Vec<Uid> {
        self.known.iter().copied().collect()
    }

    /// Latest states in ascending uid order.
    pub fn states(&self) -> impl Iterator<Item = &RobotState> {
        self.observations.values().map(|o| &o.state)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }
}
