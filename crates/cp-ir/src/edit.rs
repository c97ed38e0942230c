//! Recorded parameter writes, for undo/redo.

use alloc::vec::Vec;

use crate::input::InputIndex;
use crate::param::{ParamKey, ParamValue};

/// An edit command that mutates input parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamEdit {
    /// Set a single parameter on one input.
    Set {
        input: InputIndex,
        key: ParamKey,
        value: ParamValue,
    },
}

#[derive(Clone, Copy, Debug)]
struct JournalEntry {
    input: InputIndex,
    key: ParamKey,
    old: ParamValue,
    new: ParamValue,
}

/// Collects the writes of one gesture.
///
/// Repeated writes to the same (input, key) collapse into a single entry
/// holding the first old value and the latest new value.
#[derive(Clone, Debug, Default)]
pub struct EditJournal {
    entries: Vec<JournalEntry>,
}

impl EditJournal {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Record a write that changed `key` on `input` from `old` to `new`.
    pub fn record(&mut self, input: InputIndex, key: ParamKey, old: ParamValue, new: ParamValue) {
        match self.entries.iter_mut().find(|e| e.input == input && e.key == key) {
            Some(entry) => entry.new = new,
            None => self.entries.push(JournalEntry { input, key, old, new }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.old == e.new)
    }

    /// Split into (forward, reverse) edit batches, dropping entries that
    /// ended where they started.
    pub fn into_batches(self) -> (Vec<ParamEdit>, Vec<ParamEdit>) {
        let net: Vec<JournalEntry> = self.entries.into_iter().filter(|e| e.old != e.new).collect();
        let forward = net
            .iter()
            .map(|e| ParamEdit::Set { input: e.input, key: e.key, value: e.new })
            .collect();
        let reverse = net
            .iter()
            .rev()
            .map(|e| ParamEdit::Set { input: e.input, key: e.key, value: e.old })
            .collect();
        (forward, reverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_writes_coalesce() {
        let mut journal = EditJournal::new();
        journal.record(0, ParamKey::PositionX, ParamValue::Float(0.0), ParamValue::Float(0.1));
        journal.record(0, ParamKey::PositionX, ParamValue::Float(0.1), ParamValue::Float(0.2));
        journal.record(1, ParamKey::PositionX, ParamValue::Float(5.0), ParamValue::Float(5.1));

        let (forward, reverse) = journal.into_batches();
        assert_eq!(forward.len(), 2);
        assert_eq!(
            forward[0],
            ParamEdit::Set { input: 0, key: ParamKey::PositionX, value: ParamValue::Float(0.2) }
        );
        assert_eq!(
            reverse[1],
            ParamEdit::Set { input: 0, key: ParamKey::PositionX, value: ParamValue::Float(0.0) }
        );
    }

    #[test]
    fn round_trip_to_start_is_dropped() {
        let mut journal = EditJournal::new();
        journal.record(2, ParamKey::Attenuation, ParamValue::Float(-6.0), ParamValue::Float(-7.0));
        journal.record(2, ParamKey::Attenuation, ParamValue::Float(-7.0), ParamValue::Float(-6.0));
        assert!(journal.is_empty());
        let (forward, reverse) = journal.into_batches();
        assert!(forward.is_empty() && reverse.is_empty());
    }
}
