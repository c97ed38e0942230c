//! Change notification vocabulary.

/// What kind of state a notification is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Cluster assignment (or anything else that reorders membership)
    Membership,
    Position,
    Offset,
    Attenuation,
    /// Per-input or global tracking flags
    Tracking,
    /// Selected cluster, reference mode or plane
    Session,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 6] = [
        ChangeKind::Membership,
        ChangeKind::Position,
        ChangeKind::Offset,
        ChangeKind::Attenuation,
        ChangeKind::Tracking,
        ChangeKind::Session,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of pending change kinds, drained once per atomic operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet(u8);

impl ChangeSet {
    pub const EMPTY: ChangeSet = ChangeSet(0);

    pub fn insert(&mut self, kind: ChangeKind) {
        self.0 |= kind.bit();
    }

    pub fn contains(&self, kind: ChangeKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: ChangeSet) -> ChangeSet {
        ChangeSet(self.0 | other.0)
    }

    /// Kinds in the set, in `ChangeKind::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = ChangeKind> {
        ChangeKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl From<ChangeKind> for ChangeSet {
    fn from(kind: ChangeKind) -> Self {
        let mut set = ChangeSet::EMPTY;
        set.insert(kind);
        set
    }
}
