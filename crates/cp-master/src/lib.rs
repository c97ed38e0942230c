//! Headless cluster controller for clusterpan.
//!
//! Owns the input table, the transform engine with its session state and
//! the control loop, and gives the presentation layer one API to drive
//! them. Every public operation is atomic from a listener's point of view:
//! listeners hear about each kind of change once, after the operation has
//! finished writing.

mod config;
mod error;
mod ticker;
mod undo;

use cp_engine::{
    cluster_sizes, tracked_member, ControlFrame, ControlLoop, SessionState, TickActivity,
    TransformEngine,
};
use cp_ir::{
    ChangeSet, ClusterId, Input, InputTable, ParamKey, ParamValue, TrackingConfig, MAX_CLUSTERS,
};
use slotmap::SlotMap;

// Re-export common types so callers don't need cp-ir/cp-engine directly.
pub use config::{Config, ModeSetting, PlaneSetting};
pub use cp_engine::ClusterSettings;
pub use cp_ir::{ChangeKind, GlobalKey, InputIndex, InputStore, Plane, ReferenceMode, Vec3};
pub use error::Error;
pub use ticker::Ticker;
pub use undo::{UndoStack, MAX_UNDO_DEPTH};

slotmap::new_key_type! {
    /// Handle returned by [`Controller::subscribe`].
    pub struct ListenerId;
}

type Listener = Box<dyn FnMut(ChangeKind) + Send>;

/// Who opened the gesture currently being journalled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gesture {
    Idle,
    /// Opened by `begin_gesture` (e.g. a mouse drag); closed by `end_gesture`.
    Manual,
    /// Opened by a deflected control; closed on the first centred tick.
    Control,
}

/// Headless cluster controller: owns the store and the editing session.
pub struct Controller {
    store: InputTable,
    engine: TransformEngine,
    control: ControlLoop,
    listeners: SlotMap<ListenerId, Listener>,
    undo: UndoStack,
    gesture: Gesture,
    /// Session-only changes (nothing in the store moved)
    pending: ChangeSet,
}

impl Controller {
    pub fn new(config: &Config) -> Self {
        Self::with_store(InputTable::new(config.input_count), config)
    }

    /// Build a controller around pre-populated inputs.
    pub fn with_inputs(inputs: Vec<Input>, config: &Config) -> Self {
        Self::with_store(InputTable::from_inputs(inputs), config)
    }

    fn with_store(store: InputTable, config: &Config) -> Self {
        Self {
            store,
            engine: TransformEngine::new(SessionState::new(config.cluster_defaults())),
            control: ControlLoop::new(config.gains()),
            listeners: SlotMap::with_key(),
            undo: UndoStack::new(),
            gesture: Gesture::Idle,
            pending: ChangeSet::EMPTY,
        }
    }

    pub fn store(&self) -> &InputTable {
        &self.store
    }

    // --- Listeners ---

    /// Register a listener, called once per kind of change per operation.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ChangeKind) + Send + 'static,
    {
        self.listeners.insert(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    fn flush(&mut self) {
        let changes = self.store.take_changes().union(std::mem::take(&mut self.pending));
        for kind in changes.iter() {
            for listener in self.listeners.values_mut() {
                listener(kind);
            }
        }
    }

    // --- Host / tracking subsystem writes (never journalled) ---

    fn check_index(&self, index: InputIndex) -> Result<(), Error> {
        if index < self.store.input_count() {
            Ok(())
        } else {
            log::warn!("input {} out of range ({} inputs)", index, self.store.input_count());
            Err(Error::InputOutOfRange(index))
        }
    }

    fn external_write(&mut self, f: impl FnOnce(&mut InputTable)) {
        let journal = self.store.take_journal();
        f(&mut self.store);
        if let Some(journal) = journal {
            self.store.resume_journal(journal);
        }
        self.flush();
    }

    /// Set the global tracking switches.
    pub fn set_tracking(&mut self, tracking: TrackingConfig) {
        self.external_write(|store| store.set_tracking(tracking));
    }

    /// Flip one global tracking switch.
    pub fn set_global(&mut self, key: GlobalKey, value: bool) {
        self.external_write(|store| store.set_global(key, value));
    }

    /// Flag whether live tracking data is arriving for `index`.
    pub fn set_tracking_active(&mut self, index: InputIndex, active: bool) -> Result<(), Error> {
        self.check_index(index)?;
        let value = ParamValue::Bool(active);
        self.external_write(|store| store.set(index, ParamKey::TrackingActive, value));
        Ok(())
    }

    /// Position write from the host or the tracking subsystem.
    pub fn set_input_position(&mut self, index: InputIndex, position: Vec3) -> Result<(), Error> {
        self.check_index(index)?;
        self.external_write(|store| store.set_position(index, position));
        Ok(())
    }

    // --- Session ---

    pub fn select_cluster(&mut self, cluster: ClusterId) {
        if self.engine.session_mut().select(cluster) {
            self.close_control_gesture();
            self.control.reset();
            self.pending.insert(ChangeKind::Session);
        }
        self.flush();
    }

    /// Parse and select a raw cluster number from a selector.
    pub fn select_cluster_id(&mut self, id: u8) -> Result<(), Error> {
        let cluster = ClusterId::new(id).ok_or(Error::InvalidCluster(id))?;
        self.select_cluster(cluster);
        Ok(())
    }

    pub fn deselect(&mut self) {
        if self.engine.session_mut().deselect() {
            self.close_control_gesture();
            self.control.reset();
            self.pending.insert(ChangeKind::Session);
        }
        self.flush();
    }

    pub fn selected_cluster(&self) -> Option<ClusterId> {
        self.engine.session().selected()
    }

    pub fn cluster_settings(&self) -> ClusterSettings {
        self.engine.session().settings()
    }

    pub fn set_reference_mode(&mut self, mode: ReferenceMode) {
        if self.engine.session_mut().set_mode(mode) {
            self.pending.insert(ChangeKind::Session);
        }
        self.flush();
    }

    pub fn set_plane(&mut self, plane: Plane) {
        if self.engine.session_mut().set_plane(plane) {
            self.pending.insert(ChangeKind::Session);
        }
        self.flush();
    }

    // --- Queries ---

    /// Members of the selected cluster, tracked member first.
    pub fn members(&self) -> Vec<InputIndex> {
        self.engine.members(&self.store).to_vec()
    }

    pub fn reference_point(&self) -> Vec3 {
        self.engine.reference_point(&self.store)
    }

    /// The member of the selected cluster whose position is tracked.
    pub fn tracked_member(&self) -> Option<InputIndex> {
        tracked_member(&self.store, &self.engine.members(&self.store))
    }

    /// Number of inputs assigned to each cluster, indexed by `ClusterId::slot()`.
    pub fn cluster_overview(&self) -> [usize; MAX_CLUSTERS] {
        cluster_sizes(&self.store)
    }

    // --- Edits ---

    /// Run one discrete edit, journalled as its own gesture unless one is open.
    fn discrete<T>(&mut self, f: impl FnOnce(&TransformEngine, &mut InputTable) -> T) -> T {
        let owns = !self.store.is_journaling();
        if owns {
            self.store.begin_journal();
        }
        let result = f(&self.engine, &mut self.store);
        if owns {
            self.commit_journal();
        }
        self.flush();
        result
    }

    fn commit_journal(&mut self) {
        if let Some(journal) = self.store.take_journal() {
            if journal.is_empty() {
                log::trace!("gesture wrote nothing, not recorded");
                return;
            }
            let (forward, reverse) = journal.into_batches();
            self.undo.push_batch(forward, reverse);
        }
    }

    fn close_control_gesture(&mut self) {
        if self.gesture == Gesture::Control {
            self.commit_journal();
            self.gesture = Gesture::Idle;
        }
    }

    /// Assign an input to a cluster, or unassign it with `None`.
    pub fn assign_input(
        &mut self,
        index: InputIndex,
        cluster: Option<ClusterId>,
    ) -> Result<(), Error> {
        self.check_index(index)?;
        let value = ParamValue::Int(cluster.map_or(0, |c| c.get() as i32));
        self.discrete(|_, store| store.set(index, ParamKey::Cluster, value));
        Ok(())
    }

    pub fn apply_position_delta(&mut self, delta: Vec3) -> bool {
        self.discrete(|engine, store| engine.apply_position_delta(store, delta))
    }

    pub fn apply_rotation_delta(&mut self, angle_degrees: f32) -> bool {
        self.discrete(|engine, store| engine.apply_rotation_delta(store, angle_degrees))
    }

    pub fn apply_scale_delta(&mut self, scale_h: f32, scale_v: f32) -> bool {
        self.discrete(|engine, store| engine.apply_scale_delta(store, scale_h, scale_v))
    }

    pub fn apply_attenuation_delta(&mut self, delta_db: f32) -> bool {
        self.discrete(|engine, store| engine.apply_attenuation_delta(store, delta_db))
    }

    /// Start a gesture: edits until [`Controller::end_gesture`] undo as one step.
    pub fn begin_gesture(&mut self) {
        match self.gesture {
            Gesture::Idle => self.store.begin_journal(),
            Gesture::Control | Gesture::Manual => {}
        }
        self.gesture = Gesture::Manual;
    }

    pub fn end_gesture(&mut self) {
        if self.gesture == Gesture::Manual {
            self.commit_journal();
            self.gesture = Gesture::Idle;
        }
    }

    /// Run one control loop tick.
    pub fn tick(&mut self, frame: &ControlFrame) -> TickActivity {
        if self.gesture == Gesture::Idle {
            self.store.begin_journal();
        }
        let activity = self.control.tick(&self.engine, &mut self.store, frame);

        match (self.gesture, activity.any()) {
            (Gesture::Idle, true) => self.gesture = Gesture::Control,
            (Gesture::Idle, false) => {
                self.store.take_journal();
            }
            (Gesture::Control, false) => self.close_control_gesture(),
            (Gesture::Control, true) | (Gesture::Manual, _) => {}
        }
        self.flush();
        activity
    }

    // --- Undo ---

    /// Revert the last gesture. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.finish_open_gesture();
        let Some(edits) = self.undo.undo().map(<[_]>::to_vec) else {
            return false;
        };
        for edit in &edits {
            self.store.apply(edit);
        }
        self.flush();
        true
    }

    /// Replay the last undone gesture. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.finish_open_gesture();
        let Some(edits) = self.undo.redo().map(<[_]>::to_vec) else {
            return false;
        };
        for edit in &edits {
            self.store.apply(edit);
        }
        self.flush();
        true
    }

    fn finish_open_gesture(&mut self) {
        if self.gesture != Gesture::Idle {
            self.commit_journal();
            self.gesture = Gesture::Idle;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
