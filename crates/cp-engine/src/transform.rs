//! Transform engine: group position, rotation, scale and attenuation edits.

use core::f32::consts::PI;

use cp_ir::{InputStore, Plane, Vec3};

use crate::membership::{resolve_members, tracked_member, Members};
use crate::reference::compute_reference;
use crate::session::SessionState;

/// Rotate `point` about `pivot` by `radians` within `plane`.
pub fn rotate_about(point: Vec3, pivot: Vec3, plane: Plane, radians: f32) -> Vec3 {
    let (h, v) = plane.axes();
    let (sin, cos) = (libm::sinf(radians), libm::cosf(radians));
    let dh = point.get(h) - pivot.get(h);
    let dv = point.get(v) - pivot.get(v);

    let mut out = point;
    out.set(h, pivot.get(h) + dh * cos - dv * sin);
    out.set(v, pivot.get(v) + dh * sin + dv * cos);
    out
}

/// Scale the in-plane coordinates of `point` relative to `pivot`.
///
/// An axis whose factor is exactly 1.0 is left bit-for-bit unchanged.
pub fn scale_about(point: Vec3, pivot: Vec3, plane: Plane, scale_h: f32, scale_v: f32) -> Vec3 {
    let (h, v) = plane.axes();
    let mut out = point;
    if scale_h != 1.0 {
        out.set(h, pivot.get(h) + (point.get(h) - pivot.get(h)) * scale_h);
    }
    if scale_v != 1.0 {
        out.set(v, pivot.get(v) + (point.get(v) - pivot.get(v)) * scale_v);
    }
    out
}

/// Applies group edits to the members of the selected cluster.
///
/// Membership and the reference point are resolved fresh from the store at
/// the start of every call. Each `apply_*` returns false when it had
/// nothing to act on (no selection, empty cluster, or an identity edit).
#[derive(Clone, Debug, Default)]
pub struct TransformEngine {
    session: SessionState,
}

impl TransformEngine {
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Members of the selected cluster (empty with no selection).
    pub fn members<S: InputStore + ?Sized>(&self, store: &S) -> Members {
        match self.session.selected() {
            Some(cluster) => resolve_members(store, cluster),
            None => Members::new(),
        }
    }

    /// Current pivot of the selected cluster.
    pub fn reference_point<S: InputStore + ?Sized>(&self, store: &S) -> Vec3 {
        compute_reference(store, &self.members(store), self.session.mode())
    }

    /// Move the group. A tracked member absorbs the delta in its offset and
    /// nothing else moves; otherwise every member's position moves.
    pub fn apply_position_delta<S: InputStore + ?Sized>(&self, store: &mut S, delta: Vec3) -> bool {
        let members = self.members(store);
        if members.is_empty() || delta.is_zero() {
            return false;
        }

        match tracked_member(store, &members) {
            Some(tracked) => {
                let offset = store.offset(tracked) + delta;
                store.set_offset(tracked, offset);
            }
            None => {
                for &index in &members {
                    let position = store.position(index) + delta;
                    store.set_position(index, position);
                }
            }
        }
        true
    }

    /// Add `delta_db` to every member's attenuation, clamped to -92..=0 dB.
    pub fn apply_attenuation_delta<S: InputStore + ?Sized>(
        &self,
        store: &mut S,
        delta_db: f32,
    ) -> bool {
        let members = self.members(store);
        if members.is_empty() || delta_db == 0.0 {
            return false;
        }
        for &index in &members {
            let db = store.attenuation(index) + delta_db;
            store.set_attenuation(index, db);
        }
        true
    }

    /// Rotate every member's position (tracked ones included) about the
    /// reference point within the active plane.
    pub fn apply_rotation_delta<S: InputStore + ?Sized>(
        &self,
        store: &mut S,
        angle_degrees: f32,
    ) -> bool {
        let members = self.members(store);
        if members.is_empty() || angle_degrees == 0.0 {
            return false;
        }

        let pivot = compute_reference(store, &members, self.session.mode());
        let plane = self.session.plane();
        let radians = angle_degrees * (PI / 180.0);
        for &index in &members {
            let rotated = rotate_about(store.position(index), pivot, plane, radians);
            store.set_position(index, rotated);
        }
        true
    }

    /// Scale every member's in-plane coordinates about the reference point.
    /// Factors are multiplicative; 1.0 leaves an axis alone.
    pub fn apply_scale_delta<S: InputStore + ?Sized>(
        &self,
        store: &mut S,
        scale_h: f32,
        scale_v: f32,
    ) -> bool {
        let members = self.members(store);
        if members.is_empty() || (scale_h == 1.0 && scale_v == 1.0) {
            return false;
        }

        let pivot = compute_reference(store, &members, self.session.mode());
        let plane = self.session.plane();
        for &index in &members {
            let scaled = scale_about(store.position(index), pivot, plane, scale_h, scale_v);
            store.set_position(index, scaled);
        }
        true
    }
}
