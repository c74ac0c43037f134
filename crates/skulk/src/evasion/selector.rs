//! Hiding-spot selection over a blue-noise candidate set.
//!
//! One [`select_spot`] call samples the configured area centered on the
//! agent, asks the [`VisibilityOracle`] about every candidate, and returns
//! the concealed candidate nearest to the agent. When nothing is concealed it
//! falls back to a flee point directly away from the observer, so a call that
//! passes validation always produces a destination.
use glam::{Vec2, Vec3};
use rand::RngCore;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::evasion::DEFAULT_EYE_HEIGHT;
use crate::sampling::PoissonDiskSampling;
use crate::visibility::{AgentId, VisibilityOracle};

/// Configuration for hiding-spot selection.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorConfig {
    /// Size of the sampling area in world units, centered on the agent.
    pub area_extent: Vec2,
    /// Minimum separation between candidate points in world units.
    pub min_distance: f32,
    /// Trigger radius around the agent; also the flee distance of the
    /// fallback point.
    pub range: f32,
    /// Offset from the observer position to its eye.
    pub eye_offset: Vec3,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            area_extent: Vec2::new(20.0, 20.0),
            min_distance: 3.0,
            range: 10.0,
            eye_offset: Vec3::new(0.0, DEFAULT_EYE_HEIGHT, 0.0),
        }
    }
}

impl SelectorConfig {
    /// Creates a new [`SelectorConfig`] with the specified sampling area.
    pub fn new(area_extent: Vec2) -> Self {
        Self {
            area_extent,
            ..Default::default()
        }
    }

    /// Sets the minimum candidate separation.
    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Sets the trigger radius and flee distance.
    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    /// Sets the observer eye offset.
    pub fn with_eye_offset(mut self, eye_offset: Vec3) -> Self {
        self.eye_offset = eye_offset;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.area_extent.is_finite()
            || self.area_extent.x <= 0.0
            || self.area_extent.y <= 0.0
        {
            return Err(Error::InvalidParameter(
                "area_extent must be > 0 in both components".into(),
            ));
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(Error::InvalidParameter(
                "min_distance must be > 0 and finite".into(),
            ));
        }
        if !self.range.is_finite() || self.range <= 0.0 {
            return Err(Error::InvalidParameter("range must be > 0 and finite".into()));
        }

        Ok(())
    }
}

/// Positions and identity for one selection call.
#[derive(Debug, Clone, Copy)]
pub struct SpotQuery {
    /// Agent position; the sampling area is centered here.
    pub agent: Vec3,
    /// Observer position (eye offset not yet applied).
    pub observer: Vec3,
    /// Identity of the agent, excluded from obstruction hits.
    pub agent_id: AgentId,
    /// Agent facing, used only to break the degenerate flee direction when
    /// agent and observer coincide.
    pub facing: Vec3,
}

impl SpotQuery {
    pub fn new(agent: Vec3, observer: Vec3, agent_id: AgentId) -> Self {
        Self {
            agent,
            observer,
            agent_id,
            facing: Vec3::X,
        }
    }

    /// Sets the agent facing.
    pub fn with_facing(mut self, facing: Vec3) -> Self {
        self.facing = facing;
        self
    }
}

/// Destination produced by [`select_spot`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Nearest sampled point the observer cannot see.
    Concealed(Vec3),
    /// Flee point directly away from the observer; no candidate was
    /// concealed.
    Flee(Vec3),
}

impl Selection {
    /// The chosen world point, regardless of variant.
    pub fn destination(&self) -> Vec3 {
        match *self {
            Selection::Concealed(point) | Selection::Flee(point) => point,
        }
    }

    pub fn is_concealed(&self) -> bool {
        matches!(self, Selection::Concealed(_))
    }
}

/// Selects a concealment destination for the agent described by `query`.
///
/// Candidates are generated lazily; each one is translated so the sampling
/// area is centered on the agent in the ground plane and tested against the
/// oracle with eye = observer + eye offset. A failed oracle query counts the
/// candidate as visible rather than trusting it as cover. Equidistant
/// concealed candidates resolve to the one sampled first, so results are
/// deterministic for a fixed RNG seed.
pub fn select_spot<R: RngCore>(
    config: &SelectorConfig,
    oracle: &dyn VisibilityOracle,
    query: &SpotQuery,
    rng: &mut R,
) -> Result<Selection> {
    config.validate()?;

    let eye = query.observer + config.eye_offset;
    let half = config.area_extent / 2.0;
    let sampling = PoissonDiskSampling::new(config.min_distance);

    let mut best: Option<(Vec3, f32)> = None;
    let mut evaluated = 0usize;
    let mut concealed = 0usize;

    for sample in sampling.samples(config.area_extent, rng) {
        evaluated += 1;

        let world = query.agent + Vec3::new(sample.x - half.x, 0.0, sample.y - half.y);
        let visible = match oracle.is_visible(eye, world, query.agent_id) {
            Ok(visible) => visible,
            Err(e) => {
                warn!("Visibility query failed for candidate {world}: {e}; assuming visible.");
                true
            }
        };
        if visible {
            continue;
        }

        concealed += 1;
        let distance = query.agent.distance(world);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((world, distance));
        }
    }

    debug!(evaluated, concealed, "Evaluated hiding-spot candidates.");

    match best {
        Some((spot, _)) => Ok(Selection::Concealed(spot)),
        None => {
            let away = query.agent - query.observer;
            let direction = if away.length_squared() > f32::EPSILON {
                away.normalize()
            } else if query.facing.length_squared() > f32::EPSILON {
                query.facing.normalize()
            } else {
                Vec3::X
            };
            Ok(Selection::Flee(query.agent + direction * config.range))
        }
    }
}
