//! Per-input parameter record and global tracking flags.

use crate::cluster::ClusterId;
use crate::param::{clamp_attenuation, ParamKey, ParamValue, ATTENUATION_MAX};
use crate::vec3::Vec3;

/// Index of an input channel in the store.
pub type InputIndex = usize;

/// Maximum number of inputs the engine considers. Membership lists are
/// bounded by this so the control tick never allocates.
pub const MAX_INPUTS: usize = 128;

/// All parameters the cluster engine touches on one input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Input {
    /// Absolute position in meters
    pub position: Vec3,
    /// Offset added on top of a tracked position
    pub offset: Vec3,
    /// Attenuation in dB (-92..=0)
    pub attenuation: f32,
    /// Cluster assignment (None = unassigned)
    pub cluster: Option<ClusterId>,
    /// Live tracking data is arriving for this input
    pub tracking_active: bool,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            offset: Vec3::ZERO,
            attenuation: ATTENUATION_MAX,
            cluster: None,
            tracking_active: false,
        }
    }
}

impl Input {
    /// An unassigned input at `position`.
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    /// Builder: assign to a cluster.
    pub fn in_cluster(mut self, cluster: ClusterId) -> Self {
        self.cluster = Some(cluster);
        self
    }

    /// Builder: mark as receiving tracking data.
    pub fn tracked(mut self) -> Self {
        self.tracking_active = true;
        self
    }

    pub fn get(&self, key: ParamKey) -> ParamValue {
        match key {
            ParamKey::Cluster => ParamValue::Int(self.cluster.map_or(0, |c| c.get() as i32)),
            ParamKey::PositionX => ParamValue::Float(self.position.x),
            ParamKey::PositionY => ParamValue::Float(self.position.y),
            ParamKey::PositionZ => ParamValue::Float(self.position.z),
            ParamKey::OffsetX => ParamValue::Float(self.offset.x),
            ParamKey::OffsetY => ParamValue::Float(self.offset.y),
            ParamKey::OffsetZ => ParamValue::Float(self.offset.z),
            ParamKey::Attenuation => ParamValue::Float(self.attenuation),
            ParamKey::TrackingActive => ParamValue::Bool(self.tracking_active),
        }
    }

    /// Write a parameter. Returns true if the stored value changed.
    pub fn set(&mut self, key: ParamKey, value: ParamValue) -> bool {
        let before = self.get(key);
        match key {
            ParamKey::Cluster => self.cluster = ClusterId::from_assignment(value.as_i32()),
            ParamKey::PositionX => self.position.x = value.as_f32(),
            ParamKey::PositionY => self.position.y = value.as_f32(),
            ParamKey::PositionZ => self.position.z = value.as_f32(),
            ParamKey::OffsetX => self.offset.x = value.as_f32(),
            ParamKey::OffsetY => self.offset.y = value.as_f32(),
            ParamKey::OffsetZ => self.offset.z = value.as_f32(),
            ParamKey::Attenuation => self.attenuation = clamp_attenuation(value.as_f32()),
            ParamKey::TrackingActive => self.tracking_active = value.as_bool(),
        }
        self.get(key) != before
    }
}

/// Global tracking switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackingConfig {
    /// `trackingEnabled`
    pub enabled: bool,
    /// `trackingProtocol`: a tracking protocol is configured and running
    pub protocol_enabled: bool,
}

impl TrackingConfig {
    /// Both switches on.
    pub fn active() -> Self {
        Self { enabled: true, protocol_enabled: true }
    }
}
