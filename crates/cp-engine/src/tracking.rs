//! Tracking override predicate.

use cp_ir::{GlobalKey, InputIndex, InputStore};

/// Whether `index` is effectively tracked: tracking is enabled globally, a
/// tracking protocol is running, and this input is receiving live data.
///
/// Always reads the store; callers must not cache the result across
/// operations.
pub fn is_tracked<S: InputStore + ?Sized>(store: &S, index: InputIndex) -> bool {
    store.global(GlobalKey::TrackingEnabled)
        && store.global(GlobalKey::TrackingProtocol)
        && store.tracking_active(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_ir::{Input, InputTable, TrackingConfig};

    fn table(enabled: bool, protocol_enabled: bool, active: bool) -> InputTable {
        let input = if active { Input::default().tracked() } else { Input::default() };
        let mut table = InputTable::from_inputs(alloc::vec![input]);
        table.set_tracking(TrackingConfig { enabled, protocol_enabled });
        table
    }

    #[test]
    fn requires_all_three_flags() {
        for enabled in [false, true] {
            for protocol in [false, true] {
                for active in [false, true] {
                    let store = table(enabled, protocol, active);
                    assert_eq!(
                        is_tracked(&store, 0),
                        enabled && protocol && active,
                        "enabled={} protocol={} active={}",
                        enabled,
                        protocol,
                        active
                    );
                }
            }
        }
    }

    #[test]
    fn reflects_latest_store_values() {
        let mut store = table(true, true, true);
        assert!(is_tracked(&store, 0));
        store.set_tracking(TrackingConfig { enabled: false, protocol_enabled: true });
        assert!(!is_tracked(&store, 0));
    }
}
