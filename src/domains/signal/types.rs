use crate::common::{SignalError, SignalResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Robot identifier as carried on the wire. Valid uids are non-negative.
pub type Uid = i32;

/// Placeholder for request fields a signal type does not use.
pub const SENTINEL: i32 = -1;

/// Number of integers in every request record.
pub const REQUEST_LEN: usize = 6;

/// Highest intensity a single LED channel accepts.
pub const LED_MAX: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum SignalType {
    GetState = 1,
    SetState = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Motion {
    Stop = 0,
    Forward = 1,
    Left = 2,
    Right = 3,
}

impl Motion {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Motion::Stop),
            1 => Some(Motion::Forward),
            2 => Some(Motion::Left),
            3 => Some(Motion::Right),
            _ => None,
        }
    }
}

/// RGB intensities for the robot LED, each channel in `[0, 3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedColor {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl LedColor {
    pub const RED: LedColor = LedColor::new(3, 0, 0);
    pub const GREEN: LedColor = LedColor::new(0, 3, 0);
    pub const BLUE: LedColor = LedColor::new(0, 0, 3);
    pub const WHITE: LedColor = LedColor::new(3, 3, 3);
    pub const TURQUOISE: LedColor = LedColor::new(0, 3, 1);
    pub const ORANGE: LedColor = LedColor::new(3, 3, 0);
    pub const MAGENTA: LedColor = LedColor::new(3, 0, 3);
    pub const CYAN: LedColor = LedColor::new(0, 3, 3);
    pub const YELLOW: LedColor = LedColor::new(3, 3, 0);
    pub const OFF: LedColor = LedColor::new(0, 0, 0);

    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    pub fn validate(&self) -> SignalResult<()> {
        for (name, value) in [("red", self.r), ("green", self.g), ("blue", self.b)] {
            if !(0..=LED_MAX).contains(&value) {
                return Err(SignalError::invalid(format!(
                    "LED {} channel {} outside [0, {}]",
                    name, value, LED_MAX
                )));
            }
        }
        Ok(())
    }
}

impl From<[i32; 3]> for LedColor {
    fn from(rgb: [i32; 3]) -> Self {
        LedColor::new(rgb[0], rgb[1], rgb[2])
    }
}

/// Outbound request. Serialized as `[type, uid, motion, led_r, led_g, led_b]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRequest {
    pub signal_type: SignalType,
    pub uid: Uid,
    pub motion: Option<Motion>,
    pub led: Option<LedColor>,
}

impl SignalRequest {
    pub fn get_state(uid: Uid) -> SignalResult<Self> {
        validate_uid(uid)?;
        Ok(Self {
            signal_type: SignalType::GetState,
            uid,
            motion: None,
            led: None,
        })
    }

    pub fn set_state(uid: Uid, motion: Motion, led: LedColor) -> SignalResult<Self> {
        validate_uid(uid)?;
        led.validate()?;
        Ok(Self {
            signal_type: SignalType::SetState,
            uid,
            motion: Some(motion),
            led: Some(led),
        })
    }

    pub fn to_fields(&self) -> [i32; REQUEST_LEN] {
        let motion = self.motion.map_or(SENTINEL, |m| m as i32);
        let (r, g, b) = self.led.map_or((SENTINEL, SENTINEL, SENTINEL), |c| (c.r, c.g, c.b));
        [self.signal_type as i32, self.uid, motion, r, g, b]
    }
}

fn validate_uid(uid: Uid) -> SignalResult<()> {
    if uid < 0 {
        return Err(SignalError::invalid(format!("uid {} is negative", uid)));
    }
    Ok(())
}

/// Decoded reply to a `GetState` request, before validation against the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateReply {
    pub uid: Uid,
    pub ambient_light: i32,
    pub neighbor_ids: Vec<Uid>,
    pub distances: Vec<i32>,
}

impl StateReply {
    /// Builds a reply from the three decoded segments, checking their shapes.
    pub fn from_segments(own: &[i32], neighbor_ids: Vec<i32>, distances: Vec<i32>) -> SignalResult<Self> {
        let [uid, ambient_light] = own else {
            return Err(SignalError::malformed(format!(
                "self-state segment has {} values, expected 2",
                own.len()
            )));
        };
        if neighbor_ids.len() != distances.len() {
            return Err(SignalError::malformed(format!(
                "{} neighbor ids but {} distances",
                neighbor_ids.len(),
                distances.len()
            )));
        }
        if let Some(id) = neighbor_ids.iter().find(|id| **id < 0) {
            return Err(SignalError::malformed(format!("negative neighbor uid {}", id)));
        }
        if let Some(d) = distances.iter().find(|d| **d < 0) {
            return Err(SignalError::malformed(format!("negative distance {}", d)));
        }
        Ok(Self {
            uid: *uid,
            ambient_light: *ambient_light,
            neighbor_ids,
            distances,
        })
    }

    /// Consumes the reply into a snapshot for `requested`, dropping the self-distance.
    pub fn into_state(self, requested: Uid) -> SignalResult<RobotState> {
        if self.uid != requested {
            return Err(SignalError::ProtocolDesync {
                requested,
                received: self.uid,
            });
        }
        let mut distances: BTreeMap<Uid, i32> =
            self.neighbor_ids.into_iter().zip(self.distances).collect();
        distances.remove(&requested);
        Ok(RobotState {
            uid: self.uid,
            ambient_light: self.ambient_light,
            distances,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotState {
    pub uid: Uid,
    pub ambient_light: i32,
    /// Neighbor uid to distance. Never contains `uid`.
    pub distances: BTreeMap<Uid, i32>,
}
