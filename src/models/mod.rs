//! Data models for distbuild.
//!
//! This module contains the core data structures used throughout the tool:
//! - [`BuildState`]: The central state container holding runtime progress and step results
//! - [`BuildConfig`]/[`BuildSettings`]: The build manifest loaded from `distbuild.yaml`
//! - [`StepKind`]: The fallible steps of the build sequence
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: Config structs derive `Serialize`/`Deserialize` for YAML persistence
//! - **Cloneable**: BuildState is wrapped in `Arc<RwLock<>>` by [`StateManager`](crate::state::StateManager) for thread-safe access
//! - **Immutable**: State updates go through StateManager's `update()` method to ensure consistency

pub mod build_state;
pub mod config;

pub use build_state::{BuildState, StepKind};
pub use config::{BuildConfig, BuildSettings};
