//! Cluster transform engine for clusterpan.
//!
//! Resolves cluster membership, picks the reference point edits pivot
//! around, and turns position, rotation, scale and attenuation deltas into
//! per-input parameter writes. [`ControlLoop`] feeds it from continuous
//! control surfaces at a fixed tick rate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod control;
mod membership;
mod reference;
mod session;
mod tracking;
mod transform;

pub use control::{
    normalize_angle, wrap_angle_delta, ControlFrame, ControlGains, ControlLoop, TickActivity,
};
pub use membership::{cluster_sizes, resolve_members, tracked_member, Members};
pub use reference::compute_reference;
pub use session::{ClusterSettings, SessionState};
pub use tracking::is_tracked;
pub use transform::{rotate_about, scale_about, TransformEngine};
