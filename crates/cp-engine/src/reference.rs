//! Reference point calculation.

use cp_ir::{InputIndex, InputStore, ReferenceMode, Vec3};

use crate::membership::tracked_member;

/// The pivot for a cluster's transforms.
///
/// Priority: a tracked member's position, then the mode (first member or
/// barycenter). An empty member list yields the origin.
pub fn compute_reference<S: InputStore + ?Sized>(
    store: &S,
    members: &[InputIndex],
    mode: ReferenceMode,
) -> Vec3 {
    let Some(&first) = members.first() else {
        return Vec3::ZERO;
    };

    if let Some(tracked) = tracked_member(store, members) {
        return store.position(tracked);
    }

    match mode {
        ReferenceMode::FirstInput => store.position(first),
        ReferenceMode::Barycenter => {
            let mut sum = Vec3::ZERO;
            for &index in members {
                sum += store.position(index);
            }
            sum / members.len() as f32
        }
    }
}
