//! Undo/redo stack of completed gestures.

use cp_ir::ParamEdit;

/// Oldest gestures are dropped past this many entries.
pub const MAX_UNDO_DEPTH: usize = 256;

/// One gesture: the writes to replay and the writes that revert them.
#[derive(Clone, Debug)]
struct UndoEntry {
    forward: Vec<ParamEdit>,
    reverse: Vec<ParamEdit>,
}

/// Linear undo history with a redo cursor.
#[derive(Debug, Default)]
pub struct UndoStack {
    entries: Vec<UndoEntry>,
    position: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed gesture. Discards anything that could be redone.
    pub fn push_batch(&mut self, forward: Vec<ParamEdit>, reverse: Vec<ParamEdit>) {
        if forward.is_empty() {
            return;
        }
        self.entries.truncate(self.position);
        if self.entries.len() == MAX_UNDO_DEPTH {
            self.entries.remove(0);
        }
        self.entries.push(UndoEntry { forward, reverse });
        self.position = self.entries.len();
    }

    /// Step back: the edits that revert the last gesture.
    pub fn undo(&mut self) -> Option<&[ParamEdit]> {
        self.position = self.position.checked_sub(1)?;
        Some(&self.entries[self.position].reverse)
    }

    /// Step forward: the edits that replay the next undone gesture.
    pub fn redo(&mut self) -> Option<&[ParamEdit]> {
        let entry = self.entries.get(self.position)?;
        self.position += 1;
        Some(&entry.forward)
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_ir::{ParamKey, ParamValue};

    fn atten(input: usize, db: f32) -> ParamEdit {
        ParamEdit::Set { input, key: ParamKey::Attenuation, value: ParamValue::Float(db) }
    }

    #[test]
    fn undo_then_redo() {
        let mut stack = UndoStack::new();
        stack.push_batch(vec![atten(0, -6.0)], vec![atten(0, 0.0)]);

        assert_eq!(stack.undo().unwrap(), &[atten(0, 0.0)]);
        assert!(!stack.can_undo());
        assert_eq!(stack.redo().unwrap(), &[atten(0, -6.0)]);
        assert!(!stack.can_redo());
    }

    #[test]
    fn history_is_capped() {
        let mut stack = UndoStack::new();
        for i in 0..MAX_UNDO_DEPTH + 10 {
            let db = -(i as f32) - 1.0;
            stack.push_batch(vec![atten(0, db)], vec![atten(0, db + 1.0)]);
        }
        let mut steps = 0;
        let mut last = None;
        while let Some(edits) = stack.undo() {
            last = Some(edits.to_vec());
            steps += 1;
        }
        assert_eq!(steps, MAX_UNDO_DEPTH);
        // The ten oldest gestures are gone.
        assert_eq!(last.unwrap(), [atten(0, -10.0)]);
        assert!(stack.can_redo());
    }

    #[test]
    fn empty_stack() {
        let mut stack = UndoStack::new();
        assert!(stack.undo().is_none());
        assert!(stack.redo().is_none());
    }

    #[test]
    fn empty_gesture_is_not_recorded() {
        let mut stack = UndoStack::new();
        stack.push_batch(Vec::new(), Vec::new());
        assert!(!stack.can_undo());
    }

    #[test]
    fn new_gesture_after_undo_truncates_redo() {
        let mut stack = UndoStack::new();
        stack.push_batch(vec![atten(0, -1.0)], vec![atten(0, 0.0)]);
        stack.push_batch(vec![atten(0, -2.0)], vec![atten(0, -1.0)]);
        stack.undo();
        assert!(stack.can_redo());

        stack.push_batch(vec![atten(1, -3.0)], vec![atten(1, 0.0)]);
        assert!(!stack.can_redo());
        assert!(stack.undo().is_some());
        assert_eq!(stack.undo().unwrap(), &[atten(0, 0.0)]);
        assert!(!stack.can_undo());
    }
}
