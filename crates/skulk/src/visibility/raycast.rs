//! Raycast adapter implementing [`VisibilityOracle`] over a segment caster.
//!
//! Preserves the "single nearest obstruction wins" semantics: only the first
//! hit along the eye-to-target segment is considered, and a hit on the
//! querying agent itself does not block the line. A field-of-view cone is
//! deliberately not part of the contract; backends wanting one can reject
//! targets before casting.
use glam::Vec3;

use crate::error::Result;
use crate::visibility::{AgentId, VisibilityOracle};

/// Nearest obstruction reported by a [`SegmentCaster`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Identity of the body that was struck.
    pub body: AgentId,
    /// Distance from the ray origin to the hit, in world units.
    pub distance: f32,
}

/// Bounded nearest-hit ray query against some obstruction backend.
///
/// `dir` is unit-length; hits beyond `max_distance` must not be reported.
pub trait SegmentCaster: Send + Sync {
    fn cast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Result<Option<RayHit>>;
}

/// [`VisibilityOracle`] backed by a [`SegmentCaster`].
#[derive(Debug, Clone)]
pub struct RaycastVisibility<C> {
    caster: C,
}

impl<C: SegmentCaster> RaycastVisibility<C> {
    pub fn new(caster: C) -> Self {
        Self { caster }
    }

    /// Consumes the adapter and returns the underlying caster.
    pub fn into_inner(self) -> C {
        self.caster
    }
}

impl<C: SegmentCaster> VisibilityOracle for RaycastVisibility<C> {
    fn is_visible(&self, observer_eye: Vec3, target: Vec3, querier: AgentId) -> Result<bool> {
        let to_target = target - observer_eye;
        let distance = to_target.length();
        if distance <= f32::EPSILON {
            // Eye and target coincide; nothing can obstruct a zero-length ray.
            return Ok(true);
        }

        let dir = to_target / distance;
        match self.caster.cast(observer_eye, dir, distance)? {
            Some(hit) if hit.body != querier => Ok(false),
            _ => Ok(true),
        }
    }
}
