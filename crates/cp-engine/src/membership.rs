//! Cluster membership resolution.

use arrayvec::ArrayVec;
use cp_ir::{ClusterId, InputIndex, InputStore, MAX_CLUSTERS, MAX_INPUTS};

use crate::tracking::is_tracked;

/// Ordered member list of one cluster. Bounded so resolving never allocates.
pub type Members = ArrayVec<InputIndex, MAX_INPUTS>;

/// Members of `cluster` in ascending input order, except that the first
/// effectively tracked member (if any) is moved to the front.
pub fn resolve_members<S: InputStore + ?Sized>(store: &S, cluster: ClusterId) -> Members {
    let count = store.input_count().min(MAX_INPUTS);
    let mut members = Members::new();
    let mut tracked = None;

    for index in 0..count {
        if store.cluster(index) != Some(cluster) {
            continue;
        }
        if tracked.is_none() && is_tracked(store, index) {
            tracked = Some(members.len());
        }
        members.push(index);
    }

    if let Some(pos) = tracked {
        let index = members.remove(pos);
        members.insert(0, index);
    }
    members
}

/// The member whose position is driven by tracking, if any.
///
/// Scans in member order, so on a freshly resolved list this is the pinned
/// first member.
pub fn tracked_member<S: InputStore + ?Sized>(
    store: &S,
    members: &[InputIndex],
) -> Option<InputIndex> {
    members.iter().copied().find(|&index| is_tracked(store, index))
}

/// Number of inputs assigned to each cluster, indexed by `ClusterId::slot()`.
pub fn cluster_sizes<S: InputStore + ?Sized>(store: &S) -> [usize; MAX_CLUSTERS] {
    let mut sizes = [0; MAX_CLUSTERS];
    for index in 0..store.input_count().min(MAX_INPUTS) {
        if let Some(cluster) = store.cluster(index) {
            sizes[cluster.slot()] += 1;
        }
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_ir::{Input, InputTable, TrackingConfig, Vec3};

    fn cluster(id: u8) -> ClusterId {
        ClusterId::new(id).unwrap()
    }

    fn scene() -> InputTable {
        let c1 = cluster(1);
        let c2 = cluster(2);
        InputTable::from_inputs(alloc::vec![
            Input::default().in_cluster(c1),
            Input::default().in_cluster(c2),
            Input::default().in_cluster(c1),
            Input::default(),
            Input::default().in_cluster(c1).tracked(),
            Input::default().in_cluster(c1).tracked(),
        ])
    }

    #[test]
    fn ascending_order_without_tracking() {
        let store = scene();
        assert_eq!(resolve_members(&store, cluster(1)).as_slice(), &[0, 2, 4, 5]);
        assert_eq!(resolve_members(&store, cluster(2)).as_slice(), &[1]);
    }

    #[test]
    fn first_tracked_member_is_pinned_first() {
        let mut store = scene();
        store.set_tracking(TrackingConfig::active());
        let members = resolve_members(&store, cluster(1));
        assert_eq!(members.as_slice(), &[4, 0, 2, 5]);
        assert_eq!(tracked_member(&store, &members), Some(4));
    }

    #[test]
    fn empty_cluster() {
        let store = scene();
        assert!(resolve_members(&store, cluster(9)).is_empty());
        assert_eq!(tracked_member(&store, &[]), None);
    }

    #[test]
    fn reassignment_is_seen_on_next_resolve() {
        let mut store = scene();
        store.set(3, cp_ir::ParamKey::Cluster, cp_ir::ParamValue::Int(1));
        store.set_position(3, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(resolve_members(&store, cluster(1)).as_slice(), &[0, 2, 3, 4, 5]);
    }

    #[test]
    fn sizes_per_cluster() {
        let sizes = cluster_sizes(&scene());
        assert_eq!(sizes[0], 4);
        assert_eq!(sizes[1], 1);
        assert_eq!(sizes[2..].iter().sum::<usize>(), 0);
    }
}
