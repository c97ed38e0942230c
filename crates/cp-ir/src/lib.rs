//! Core data model for clusterpan.
//!
//! This crate defines the inputs, clusters and parameter keys shared by the
//! transform engine and the controller. The engine reads and writes input
//! parameters only through the [`InputStore`] trait; [`InputTable`] is the
//! in-memory implementation used by the controller.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod change;
mod cluster;
mod edit;
mod input;
mod param;
mod store;
mod table;
mod vec3;

pub use change::{ChangeKind, ChangeSet};
pub use cluster::{ClusterId, ReferenceMode, MAX_CLUSTERS};
pub use edit::{EditJournal, ParamEdit};
pub use input::{Input, InputIndex, TrackingConfig, MAX_INPUTS};
pub use param::{
    clamp_attenuation, GlobalKey, ParamKey, ParamValue, ATTENUATION_MAX, ATTENUATION_MIN,
};
pub use store::InputStore;
pub use table::InputTable;
pub use vec3::{Axis, Plane, Vec3};
