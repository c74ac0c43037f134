//! Minimal obstruction backend for the demos: vertical wall segments in the
//! ground plane, intersected analytically.
use glam::{Vec2, Vec3};
use skulk::error::Result;
use skulk::visibility::{AgentId, RayHit, SegmentCaster};

/// A set of infinitely tall wall segments in the x/z plane.
pub struct WallWorld {
    segments: Vec<(Vec2, Vec2)>,
    wall_body: AgentId,
}

impl WallWorld {
    pub fn new(wall_body: AgentId) -> Self {
        Self {
            segments: Vec::new(),
            wall_body,
        }
    }

    /// Adds a wall between two ground-plane points `(x, z)`.
    pub fn with_wall(mut self, from: Vec2, to: Vec2) -> Self {
        self.segments.push((from, to));
        self
    }

    /// Intersection parameter along a 2D ray for one segment, if any.
    fn hit_segment(origin: Vec2, dir: Vec2, from: Vec2, to: Vec2) -> Option<f32> {
        let seg = to - from;
        let denom = dir.x * seg.y - dir.y * seg.x;
        if denom.abs() < 1e-9 {
            return None;
        }

        let delta = from - origin;
        let t = (delta.x * seg.y - delta.y * seg.x) / denom;
        let u = (delta.x * dir.y - delta.y * dir.x) / denom;

        if t >= 0.0 && (0.0..=1.0).contains(&u) {
            Some(t)
        } else {
            None
        }
    }
}

impl SegmentCaster for WallWorld {
    fn cast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Result<Option<RayHit>> {
        let ground_dir = Vec2::new(dir.x, dir.z);
        let ground_speed = ground_dir.length();
        if ground_speed < 1e-9 {
            // Straight up or down; walls have no roof to hit.
            return Ok(None);
        }

        let origin_2d = Vec2::new(origin.x, origin.z);
        let dir_2d = ground_dir / ground_speed;

        let mut nearest: Option<f32> = None;
        for &(from, to) in &self.segments {
            if let Some(t_2d) = Self::hit_segment(origin_2d, dir_2d, from, to) {
                // Ground-plane distance back to distance along the 3D ray.
                let t = t_2d / ground_speed;
                if t <= max_distance && nearest.is_none_or(|n| t < n) {
                    nearest = Some(t);
                }
            }
        }

        Ok(nearest.map(|distance| RayHit {
            body: self.wall_body,
            distance,
        }))
    }
}
