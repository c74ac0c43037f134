//! Poisson disk position sampling strategy.
//!
//! Implements Bridson's active-list variant: a background grid with cell size
//! `radius / sqrt(2)` holds at most one accepted sample per cell, giving O(1)
//! neighborhood checks, and every accepted sample spawns up to
//! [`MAX_ATTEMPTS`] annulus candidates before it is retired from the active
//! list. Samples are produced lazily through the [`Samples`] iterator.
use std::f32::consts::PI;

use glam::Vec2;
use mint::Vector2;
use rand::RngCore;

use crate::sampling::{next_down, rand01, PositionSampling};

/// Candidate generation attempts per active point before it is retired.
pub const MAX_ATTEMPTS: usize = 30;

/// Poisson disk sampling strategy.
///
/// Output covers the domain `[0, W) x [0, H)` with a guaranteed minimum
/// pairwise separation of `radius`.
#[derive(Debug, Clone)]
pub struct PoissonDiskSampling {
    /// Minimum distance between samples in world units.
    pub radius: f32,
    /// First accepted sample; defaults to the domain center.
    pub seed_point: Option<Vec2>,
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with specified radius.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            seed_point: None,
        }
    }

    /// Override the seed sample emitted first (clamped into the domain).
    pub fn with_seed_point(mut self, seed_point: Vec2) -> Self {
        self.seed_point = Some(seed_point);
        self
    }

    /// Lazily generate samples for the given domain extent.
    ///
    /// The sequence is finite and not restartable: it borrows and advances
    /// `rng`, so regenerating requires a fresh call with fresh RNG state.
    pub fn samples<'r>(&self, domain_extent: Vec2, rng: &'r mut dyn RngCore) -> Samples<'r> {
        Samples::new(self.radius, self.seed_point, domain_extent, rng)
    }
}

impl PositionSampling for PoissonDiskSampling {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        self.samples(Vec2::from(domain_extent), rng)
            .map(Into::into)
            .collect()
    }
}

/// Lazy, finite sequence of Poisson disk samples.
pub struct Samples<'r> {
    radius: f32,
    radius_squared: f32,
    cell_size: f32,
    grid_width: usize,
    grid_height: usize,
    grid: Vec<Option<Vec2>>,
    active: Vec<Vec2>,
    bounds: Vec2,
    seed: Vec2,
    started: bool,
    rng: &'r mut dyn RngCore,
}

impl<'r> Samples<'r> {
    fn new(radius: f32, seed_point: Option<Vec2>, bounds: Vec2, rng: &'r mut dyn RngCore) -> Self {
        let degenerate = !radius.is_finite()
            || radius <= 0.0
            || !bounds.is_finite()
            || bounds.x <= 0.0
            || bounds.y <= 0.0;

        if degenerate {
            return Self {
                radius,
                radius_squared: 0.0,
                cell_size: 1.0,
                grid_width: 0,
                grid_height: 0,
                grid: Vec::new(),
                active: Vec::new(),
                bounds,
                seed: Vec2::ZERO,
                // Marking the sequence as started with an empty active list
                // makes the iterator immediately exhausted.
                started: true,
                rng,
            };
        }

        let radius_squared = radius * radius;
        let cell_size = radius / std::f32::consts::SQRT_2;
        let grid_width = (bounds.x / cell_size).ceil() as usize + 1;
        let grid_height = (bounds.y / cell_size).ceil() as usize + 1;

        let seed = seed_point
            .unwrap_or(bounds / 2.0)
            .clamp(Vec2::ZERO, Vec2::new(next_down(bounds.x), next_down(bounds.y)));

        Self {
            radius,
            radius_squared,
            cell_size,
            grid_width,
            grid_height,
            grid: vec![None; grid_width * grid_height],
            active: Vec::new(),
            bounds,
            seed,
            started: false,
            rng,
        }
    }

    #[inline]
    fn grid_index(&self, x: usize, y: usize) -> usize {
        y * self.grid_width + x
    }

    #[inline]
    fn point_to_grid(&self, point: Vec2) -> (usize, usize) {
        let x = ((point.x / self.cell_size).floor() as isize)
            .clamp(0, self.grid_width as isize - 1) as usize;
        let y = ((point.y / self.cell_size).floor() as isize)
            .clamp(0, self.grid_height as isize - 1) as usize;
        (x, y)
    }

    fn is_valid_point(&self, point: Vec2) -> bool {
        if point.x < 0.0 || point.x >= self.bounds.x || point.y < 0.0 || point.y >= self.bounds.y {
            return false;
        }

        let (gx, gy) = self.point_to_grid(point);
        let start_x = gx.saturating_sub(2);
        let end_x = (gx + 3).min(self.grid_width);
        let start_y = gy.saturating_sub(2);
        let end_y = (gy + 3).min(self.grid_height);

        for y in start_y..end_y {
            for x in start_x..end_x {
                let idx = self.grid_index(x, y);
                if let Some(existing) = self.grid[idx] {
                    let dx = point.x - existing.x;
                    let dy = point.y - existing.y;
                    if dx * dx + dy * dy < self.radius_squared {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn add_point(&mut self, point: Vec2) {
        let (gx, gy) = self.point_to_grid(point);
        let idx = self.grid_index(gx, gy);
        self.grid[idx] = Some(point);
        self.active.push(point);
    }
}

impl Iterator for Samples<'_> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if !self.started {
            self.started = true;
            let seed = self.seed;
            self.add_point(seed);
            return Some(seed);
        }

        while !self.active.is_empty() {
            let slot =
                ((rand01(self.rng) * self.active.len() as f32) as usize).min(self.active.len() - 1);
            let origin = self.active[slot];

            for _ in 0..MAX_ATTEMPTS {
                let angle = rand01(self.rng) * 2.0 * PI;
                let distance = self.radius + rand01(self.rng) * self.radius;

                let candidate = Vec2::new(
                    origin.x + angle.cos() * distance,
                    origin.y + angle.sin() * distance,
                );

                if self.is_valid_point(candidate) {
                    self.add_point(candidate);
                    return Some(candidate);
                }
            }

            // All attempts around this point landed too close to accepted
            // samples or outside the domain; it stays accepted but no longer
            // spawns children.
            self.active.swap_remove(slot);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn pairwise_min_distance(points: &[Vec2]) -> f32 {
        let mut min = f32::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let dist = (points[i] - points[j]).length();
                if dist < min {
                    min = dist;
                }
            }
        }
        min
    }

    #[test]
    fn samples_initialize_grid_dimensions() {
        let mut rng = StdRng::seed_from_u64(7);
        let iter = Samples::new(0.5, None, Vec2::new(2.0, 1.0), &mut rng);
        assert_eq!(
            iter.grid_width,
            ((2.0 / iter.cell_size).ceil() as usize) + 1
        );
        assert_eq!(
            iter.grid_height,
            ((1.0 / iter.cell_size).ceil() as usize) + 1
        );
    }

    #[test]
    fn is_valid_point_rejects_close_neighbors() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut iter = Samples::new(1.0, None, Vec2::new(4.0, 4.0), &mut rng);
        iter.add_point(Vec2::new(2.0, 2.0));

        assert!(!iter.is_valid_point(Vec2::new(2.5, 2.0)));
        assert!(iter.is_valid_point(Vec2::new(3.5, 3.5)));
    }

    #[test]
    fn generated_points_respect_radius_and_bounds() {
        let mut rng = StdRng::seed_from_u64(123);
        let sampling = PoissonDiskSampling::new(0.3);
        let points: Vec<Vec2> = sampling.samples(Vec2::new(1.0, 1.0), &mut rng).collect();

        assert!(!points.is_empty());
        for p in &points {
            assert!(p.x >= 0.0 && p.x < 1.0);
            assert!(p.y >= 0.0 && p.y < 1.0);
        }
        if points.len() > 1 {
            assert!(pairwise_min_distance(&points) >= 0.3 - 1e-6);
        }
    }

    #[test]
    fn zero_radius_returns_no_points() {
        let mut rng = StdRng::seed_from_u64(1);
        let sampling = PoissonDiskSampling::new(0.0);
        let points = sampling.generate(Vec2::new(1.0, 1.0).into(), &mut rng);
        assert!(points.is_empty());
    }

    #[test]
    fn radius_covering_domain_yields_only_the_seed() {
        let mut rng = StdRng::seed_from_u64(9);
        let sampling = PoissonDiskSampling::new(25.0);
        let points: Vec<Vec2> = sampling.samples(Vec2::new(20.0, 20.0), &mut rng).collect();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0], Vec2::new(10.0, 10.0));
    }

    #[test]
    fn seed_point_override_is_emitted_first() {
        let mut rng = StdRng::seed_from_u64(3);
        let sampling = PoissonDiskSampling::new(2.0).with_seed_point(Vec2::new(1.0, 4.0));
        let first = sampling
            .samples(Vec2::new(10.0, 10.0), &mut rng)
            .next()
            .expect("seed sample");
        assert_eq!(first, Vec2::new(1.0, 4.0));
    }

    #[test]
    fn identical_seeds_produce_identical_sequences() {
        let sampling = PoissonDiskSampling::new(3.0);

        let mut rng_a = StdRng::seed_from_u64(42);
        let a: Vec<Vec2> = sampling.samples(Vec2::new(20.0, 20.0), &mut rng_a).collect();

        let mut rng_b = StdRng::seed_from_u64(42);
        let b: Vec<Vec2> = sampling.samples(Vec2::new(20.0, 20.0), &mut rng_b).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn generate_matches_lazy_iterator() {
        let sampling = PoissonDiskSampling::new(0.5);

        let mut rng_a = StdRng::seed_from_u64(11);
        let lazy: Vec<Vec2> = sampling.samples(Vec2::new(4.0, 4.0), &mut rng_a).collect();

        let mut rng_b = StdRng::seed_from_u64(11);
        let collected: Vec<Vec2> = sampling
            .generate(Vec2::new(4.0, 4.0).into(), &mut rng_b)
            .into_iter()
            .map(Vec2::from)
            .collect();

        assert_eq!(lazy, collected);
    }
}
