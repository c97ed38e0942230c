//! The parameter store contract.

use crate::cluster::ClusterId;
use crate::input::InputIndex;
use crate::param::{clamp_attenuation, GlobalKey, ParamKey, ParamValue};
use crate::vec3::Vec3;

/// Key/value access to per-input parameters and the global tracking flags.
///
/// Reads of an index past `input_count()` return the parameter's default;
/// writes to such an index are ignored. Implementations are expected to
/// raise their own change notifications on effective writes.
pub trait InputStore {
    /// Number of inputs in the host's channel configuration.
    fn input_count(&self) -> usize;

    fn get(&self, index: InputIndex, key: ParamKey) -> ParamValue;

    fn set(&mut self, index: InputIndex, key: ParamKey, value: ParamValue);

    fn global(&self, key: GlobalKey) -> bool;

    // --- Typed accessors ---

    fn position(&self, index: InputIndex) -> Vec3 {
        read_vec3(self, index, ParamKey::POSITION)
    }

    fn set_position(&mut self, index: InputIndex, position: Vec3) {
        write_vec3(self, index, ParamKey::POSITION, position);
    }

    fn offset(&self, index: InputIndex) -> Vec3 {
        read_vec3(self, index, ParamKey::OFFSET)
    }

    fn set_offset(&mut self, index: InputIndex, offset: Vec3) {
        write_vec3(self, index, ParamKey::OFFSET, offset);
    }

    fn attenuation(&self, index: InputIndex) -> f32 {
        self.get(index, ParamKey::Attenuation).as_f32()
    }

    /// Write attenuation, clamped to the valid dB range.
    fn set_attenuation(&mut self, index: InputIndex, db: f32) {
        self.set(index, ParamKey::Attenuation, ParamValue::Float(clamp_attenuation(db)));
    }

    fn cluster(&self, index: InputIndex) -> Option<ClusterId> {
        ClusterId::from_assignment(self.get(index, ParamKey::Cluster).as_i32())
    }

    fn tracking_active(&self, index: InputIndex) -> bool {
        self.get(index, ParamKey::TrackingActive).as_bool()
    }
}

// `keys` are ordered x, y, z.
fn read_vec3<S: InputStore + ?Sized>(store: &S, index: InputIndex, keys: [ParamKey; 3]) -> Vec3 {
    let [x, y, z] = keys.map(|key| store.get(index, key).as_f32());
    Vec3::new(x, y, z)
}

fn write_vec3<S: InputStore + ?Sized>(
    store: &mut S,
    index: InputIndex,
    keys: [ParamKey; 3],
    v: Vec3,
) {
    for (key, value) in keys.into_iter().zip([v.x, v.y, v.z]) {
        store.set(index, key, ParamValue::Float(value));
    }
}
