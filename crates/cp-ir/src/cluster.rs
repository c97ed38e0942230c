//! Cluster identifiers and reference modes.

use core::fmt;

/// Number of selectable clusters.
pub const MAX_CLUSTERS: usize = 10;

/// A cluster id in `1..=MAX_CLUSTERS`.
///
/// Id 0 is reserved for "unassigned" in the store and is not representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u8);

impl ClusterId {
    /// Validate a raw cluster number.
    pub fn new(id: u8) -> Option<Self> {
        if id >= 1 && id as usize <= MAX_CLUSTERS {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Decode a stored assignment value (0 or out of range = unassigned).
    pub fn from_assignment(value: i32) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::new)
    }

    /// The raw id as stored in `inputCluster`.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot for per-cluster tables.
    pub fn slot(self) -> usize {
        self.0 as usize - 1
    }

    /// All cluster ids in ascending order.
    pub fn all() -> impl Iterator<Item = ClusterId> {
        (1..=MAX_CLUSTERS as u8).map(ClusterId)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the pivot of an untracked cluster is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReferenceMode {
    /// The first member's position.
    #[default]
    FirstInput,
    /// Mean position of all members.
    Barycenter,
}

impl ReferenceMode {
    pub fn label(self) -> &'static str {
        match self {
            ReferenceMode::FirstInput => "First input",
            ReferenceMode::Barycenter => "Barycenter",
        }
    }
}
