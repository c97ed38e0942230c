//! Parameter keys and values exchanged with the store.

use crate::change::ChangeKind;

/// Lowest attenuation in dB.
pub const ATTENUATION_MIN: f32 = -92.0;
/// Highest attenuation in dB (unity).
pub const ATTENUATION_MAX: f32 = 0.0;

/// Clamp an attenuation value into `[ATTENUATION_MIN, ATTENUATION_MAX]`.
pub fn clamp_attenuation(db: f32) -> f32 {
    db.clamp(ATTENUATION_MIN, ATTENUATION_MAX)
}

/// A per-input parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// `inputCluster`: 0 = unassigned, 1..=10 = cluster id
    Cluster,
    PositionX,
    PositionY,
    PositionZ,
    OffsetX,
    OffsetY,
    OffsetZ,
    /// `inputAttenuation` in dB
    Attenuation,
    /// `inputTrackingActive`: set by the tracking subsystem
    TrackingActive,
}

impl ParamKey {
    pub const POSITION: [ParamKey; 3] =
        [ParamKey::PositionX, ParamKey::PositionY, ParamKey::PositionZ];
    pub const OFFSET: [ParamKey; 3] = [ParamKey::OffsetX, ParamKey::OffsetY, ParamKey::OffsetZ];

    /// Which notification a write to this key raises.
    pub fn change_kind(self) -> ChangeKind {
        match self {
            ParamKey::Cluster => ChangeKind::Membership,
            ParamKey::PositionX | ParamKey::PositionY | ParamKey::PositionZ => ChangeKind::Position,
            ParamKey::OffsetX | ParamKey::OffsetY | ParamKey::OffsetZ => ChangeKind::Offset,
            ParamKey::Attenuation => ChangeKind::Attenuation,
            ParamKey::TrackingActive => ChangeKind::Tracking,
        }
    }

    /// Property identifier as used by the host store.
    pub fn name(self) -> &'static str {
        match self {
            ParamKey::Cluster => "inputCluster",
            ParamKey::PositionX => "inputPositionX",
            ParamKey::PositionY => "inputPositionY",
            ParamKey::PositionZ => "inputPositionZ",
            ParamKey::OffsetX => "inputOffsetX",
            ParamKey::OffsetY => "inputOffsetY",
            ParamKey::OffsetZ => "inputOffsetZ",
            ParamKey::Attenuation => "inputAttenuation",
            ParamKey::TrackingActive => "inputTrackingActive",
        }
    }
}

/// A global tracking flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlobalKey {
    TrackingEnabled,
    TrackingProtocol,
}

impl GlobalKey {
    pub fn name(self) -> &'static str {
        match self {
            GlobalKey::TrackingEnabled => "trackingEnabled",
            GlobalKey::TrackingProtocol => "trackingProtocol",
        }
    }
}

/// A loosely typed parameter value, as the host store hands them out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Int(i32),
    Bool(bool),
}

impl ParamValue {
    pub fn as_f32(self) -> f32 {
        match self {
            ParamValue::Float(v) => v,
            ParamValue::Int(v) => v as f32,
            ParamValue::Bool(true) => 1.0,
            ParamValue::Bool(false) => 0.0,
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            ParamValue::Float(v) => v as i32,
            ParamValue::Int(v) => v,
            ParamValue::Bool(b) => b as i32,
        }
    }

    pub fn as_bool(self) -> bool {
        match self {
            ParamValue::Float(v) => v != 0.0,
            ParamValue::Int(v) => v != 0,
            ParamValue::Bool(b) => b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attenuation_clamp_bounds() {
        assert_eq!(clamp_attenuation(-120.0), -92.0);
        assert_eq!(clamp_attenuation(6.0), 0.0);
        assert_eq!(clamp_attenuation(-12.5), -12.5);
    }

    #[test]
    fn value_coercions() {
        assert_eq!(ParamValue::Int(3).as_f32(), 3.0);
        assert_eq!(ParamValue::Float(2.9).as_i32(), 2);
        assert!(ParamValue::Int(1).as_bool());
        assert!(!ParamValue::Float(0.0).as_bool());
        assert_eq!(ParamValue::Bool(true).as_i32(), 1);
    }

    #[test]
    fn keys_map_to_change_kinds() {
        assert_eq!(ParamKey::Cluster.change_kind(), ChangeKind::Membership);
        assert_eq!(ParamKey::PositionZ.change_kind(), ChangeKind::Position);
        assert_eq!(ParamKey::OffsetY.change_kind(), ChangeKind::Offset);
        assert_eq!(ParamKey::TrackingActive.change_kind(), ChangeKind::Tracking);
    }

    #[test]
    fn host_names() {
        assert_eq!(ParamKey::POSITION.map(ParamKey::name)[2], "inputPositionZ");
        assert_eq!(ParamKey::OFFSET.map(ParamKey::name)[0], "inputOffsetX");
        assert_eq!(GlobalKey::TrackingProtocol.name(), "trackingProtocol");
    }
}
