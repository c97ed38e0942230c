//! Allocation-free control tick tests.
//!
//! These tests verify that `ControlLoop::tick()` does not allocate: the
//! loop runs on the control thread at a fixed rate and must only do bounded
//! in-memory arithmetic. A full-size cluster is driven with every control
//! deflected, with and without a tracked member.
//!
//! Just run `cargo test`, no feature flags needed.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use cp_engine::{ControlFrame, ControlLoop, TransformEngine};
use cp_ir::{
    ClusterId, Input, InputStore, InputTable, ParamKey, ParamValue, ReferenceMode, TrackingConfig,
    Vec3, MAX_INPUTS,
};

fn full_cluster(mode: ReferenceMode) -> (TransformEngine, InputTable) {
    let cluster = ClusterId::new(4).unwrap();
    let inputs = (0..MAX_INPUTS)
        .map(|i| Input::at(Vec3::new(i as f32 * 0.1, 1.0, 0.0)).in_cluster(cluster))
        .collect();
    let mut engine = TransformEngine::default();
    engine.session_mut().select(cluster);
    engine.session_mut().set_mode(mode);
    (engine, InputTable::from_inputs(inputs))
}

/// Run `ticks` control ticks, aborting on any heap allocation.
fn assert_ticks_alloc_free(engine: &TransformEngine, table: &mut InputTable, ticks: u32) {
    let mut control = ControlLoop::default();
    assert_no_alloc(|| {
        for tick in 0..ticks {
            let frame = ControlFrame {
                position_pad: [0.5, -0.25],
                elevation: 0.1,
                attenuation: -0.2,
                rotation: (tick as f32 * 7.0) % 360.0 - 180.0,
                scale_pad: [0.05, -0.05],
            };
            control.tick(engine, table, &frame);
        }
    });
}

#[test]
fn barycenter_tick_alloc_free() {
    let (engine, mut table) = full_cluster(ReferenceMode::Barycenter);
    assert_ticks_alloc_free(&engine, &mut table, 500);
}

#[test]
fn first_input_tick_alloc_free() {
    let (engine, mut table) = full_cluster(ReferenceMode::FirstInput);
    assert_ticks_alloc_free(&engine, &mut table, 500);
}

#[test]
fn tracked_tick_alloc_free() {
    let (engine, mut table) = full_cluster(ReferenceMode::Barycenter);
    table.set(17, ParamKey::TrackingActive, ParamValue::Bool(true));
    table.set_tracking(TrackingConfig::active());
    assert_ticks_alloc_free(&engine, &mut table, 500);
    assert_ne!(table.offset(17), Vec3::ZERO);
}
