//! Line-of-sight query contract consumed by the evasion pipeline.
//!
//! The selector never inspects geometry itself; it asks a [`VisibilityOracle`]
//! whether the observer has a clear line to a candidate point. Any
//! ray/geometry backend can stand behind the trait; [`raycast`] provides the
//! adapter for backends that expose a nearest-hit segment cast.
use glam::Vec3;

use crate::error::Result;

pub mod raycast;

pub use raycast::{RayHit, RaycastVisibility, SegmentCaster};

/// Opaque identity of a body in the obstruction world.
///
/// Used to recognize the querying agent among ray hits so that an agent never
/// counts as its own cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u64);

/// Boolean line-of-sight test between an observer eye and a target point.
///
/// Implementations must be pure queries: no world mutation, distance-limited
/// to the eye-to-target segment, and safe for concurrent read-only use from
/// multiple agents (hence the `Send + Sync` bound).
pub trait VisibilityOracle: Send + Sync {
    /// Returns whether `target` is visible from `observer_eye`.
    ///
    /// An obstruction strictly between the two points blocks visibility
    /// unless that obstruction is the querying agent itself.
    fn is_visible(&self, observer_eye: Vec3, target: Vec3, querier: AgentId) -> Result<bool>;
}
