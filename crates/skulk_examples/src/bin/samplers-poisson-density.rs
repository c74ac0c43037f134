//! Prints Poisson disk sample counts and the realized minimum pairwise
//! distance for a sweep of separation radii.
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use skulk::prelude::*;

fn main() -> anyhow::Result<()> {
    let extent = Vec2::new(100.0, 100.0);

    for radius in [2.0f32, 4.0, 8.0, 16.0, 32.0] {
        let sampling = PoissonDiskSampling::new(radius);
        let mut rng = StdRng::seed_from_u64(42);
        let points: Vec<Vec2> = sampling
            .generate(extent.into(), &mut rng)
            .into_iter()
            .map(Vec2::from)
            .collect();

        let mut min_dist = f32::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                min_dist = min_dist.min((points[i] - points[j]).length());
            }
        }

        println!(
            "radius {radius:>5.1}: {:>5} samples, realized min distance {:.3}",
            points.len(),
            if points.len() > 1 { min_dist } else { f32::NAN }
        );
    }

    Ok(())
}
