//! In-memory observable parameter store.

use alloc::vec::Vec;

use crate::change::{ChangeKind, ChangeSet};
use crate::edit::{EditJournal, ParamEdit};
use crate::input::{Input, InputIndex, TrackingConfig, MAX_INPUTS};
use crate::param::{GlobalKey, ParamKey, ParamValue};
use crate::store::InputStore;

/// A flat table of inputs plus the global tracking switches.
///
/// Every effective write marks the matching [`ChangeKind`]; the owner
/// drains them with [`InputTable::take_changes`] after each atomic
/// operation. While a journal is open, writes are also recorded for undo.
#[derive(Clone, Debug, Default)]
pub struct InputTable {
    inputs: Vec<Input>,
    tracking: TrackingConfig,
    changes: ChangeSet,
    journal: Option<EditJournal>,
}

impl InputTable {
    /// Create `count` default inputs (capped at `MAX_INPUTS`).
    pub fn new(count: usize) -> Self {
        Self::from_inputs(alloc::vec![Input::default(); count])
    }

    /// Create a table from existing input records (capped at `MAX_INPUTS`).
    pub fn from_inputs(mut inputs: Vec<Input>) -> Self {
        if inputs.len() > MAX_INPUTS {
            log::warn!("{} inputs requested, keeping the first {}", inputs.len(), MAX_INPUTS);
            inputs.truncate(MAX_INPUTS);
        }
        Self {
            inputs,
            tracking: TrackingConfig::default(),
            changes: ChangeSet::EMPTY,
            journal: None,
        }
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn input(&self, index: InputIndex) -> Option<&Input> {
        self.inputs.get(index)
    }

    pub fn tracking(&self) -> TrackingConfig {
        self.tracking
    }

    /// Replace both global tracking switches.
    pub fn set_tracking(&mut self, tracking: TrackingConfig) {
        if self.tracking != tracking {
            self.tracking = tracking;
            self.mark_tracking();
        }
    }

    /// Write one global tracking switch.
    pub fn set_global(&mut self, key: GlobalKey, value: bool) {
        log::debug!("{} = {}", key.name(), value);
        let mut tracking = self.tracking;
        match key {
            GlobalKey::TrackingEnabled => tracking.enabled = value,
            GlobalKey::TrackingProtocol => tracking.protocol_enabled = value,
        }
        self.set_tracking(tracking);
    }

    // Tracking flags reorder membership as well.
    fn mark_tracking(&mut self) {
        self.changes.insert(ChangeKind::Tracking);
        self.changes.insert(ChangeKind::Membership);
    }

    /// Drain pending change kinds.
    pub fn take_changes(&mut self) -> ChangeSet {
        core::mem::take(&mut self.changes)
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Start recording writes. A journal that is already open is kept.
    pub fn begin_journal(&mut self) {
        if self.journal.is_none() {
            self.journal = Some(EditJournal::new());
        }
    }

    /// Stop recording and hand back what was recorded.
    pub fn take_journal(&mut self) -> Option<EditJournal> {
        self.journal.take()
    }

    /// Reopen a journal previously taken with [`InputTable::take_journal`].
    pub fn resume_journal(&mut self, journal: EditJournal) {
        self.journal = Some(journal);
    }

    pub fn is_journaling(&self) -> bool {
        self.journal.is_some()
    }

    /// Apply a recorded edit.
    pub fn apply(&mut self, edit: &ParamEdit) {
        match *edit {
            ParamEdit::Set { input, key, value } => self.set(input, key, value),
        }
    }
}

impl InputStore for InputTable {
    fn input_count(&self) -> usize {
        self.inputs.len()
    }

    fn get(&self, index: InputIndex, key: ParamKey) -> ParamValue {
        match self.inputs.get(index) {
            Some(input) => input.get(key),
            None => Input::default().get(key),
        }
    }

    fn set(&mut self, index: InputIndex, key: ParamKey, value: ParamValue) {
        let Some(input) = self.inputs.get_mut(index) else {
            log::warn!("write to {} on missing input {}", key.name(), index);
            return;
        };
        let old = input.get(key);
        if !input.set(key, value) {
            return;
        }
        let new = input.get(key);
        if key == ParamKey::TrackingActive {
            self.mark_tracking();
        } else {
            self.changes.insert(key.change_kind());
        }
        if let Some(journal) = self.journal.as_mut() {
            journal.record(index, key, old, new);
        }
    }

    fn global(&self, key: GlobalKey) -> bool {
        match key {
            GlobalKey::TrackingEnabled => self.tracking.enabled,
            GlobalKey::TrackingProtocol => self.tracking.protocol_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::Vec3;

    #[test]
    fn new_is_capped() {
        let table = InputTable::new(MAX_INPUTS + 10);
        assert_eq!(table.input_count(), MAX_INPUTS);
    }

    #[test]
    fn missing_index_reads_default_and_ignores_writes() {
        let mut table = InputTable::new(2);
        table.set(5, ParamKey::PositionX, ParamValue::Float(3.0));
        assert_eq!(table.position(5), Vec3::ZERO);
        assert_eq!(table.attenuation(5), 0.0);
        assert!(!table.has_changes());
    }

    #[test]
    fn effective_writes_mark_changes() {
        let mut table = InputTable::new(2);
        table.set_position(0, Vec3::new(1.0, 0.0, 0.0));
        table.set_attenuation(1, -6.0);
        let changes = table.take_changes();
        assert!(changes.contains(ChangeKind::Position));
        assert!(changes.contains(ChangeKind::Attenuation));
        assert!(!changes.contains(ChangeKind::Offset));
        assert!(table.take_changes().is_empty());

        // Same value again: nothing to report.
        table.set_attenuation(1, -6.0);
        assert!(!table.has_changes());
    }

    #[test]
    fn tracking_writes_mark_membership() {
        let mut table = InputTable::new(1);
        table.set(0, ParamKey::TrackingActive, ParamValue::Bool(true));
        let changes = table.take_changes();
        assert!(changes.contains(ChangeKind::Tracking));
        assert!(changes.contains(ChangeKind::Membership));

        table.set_global(GlobalKey::TrackingProtocol, true);
        assert!(table.take_changes().contains(ChangeKind::Membership));
        assert!(table.global(GlobalKey::TrackingProtocol));
        assert!(!table.global(GlobalKey::TrackingEnabled));
    }

    #[test]
    fn journal_records_only_while_open() {
        let mut table = InputTable::new(1);
        table.set_attenuation(0, -1.0);
        table.begin_journal();
        table.set_attenuation(0, -2.0);
        table.set_attenuation(0, -3.0);
        let (forward, reverse) = table.take_journal().unwrap().into_batches();
        assert_eq!(forward.len(), 1);

        table.apply(&reverse[0]);
        assert_eq!(table.attenuation(0), -1.0);
        table.apply(&forward[0]);
        assert_eq!(table.attenuation(0), -3.0);
        assert!(!table.is_journaling());
    }
}
