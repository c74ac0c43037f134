//! An observer walks toward an agent standing near a wall; the controller
//! fires once on the range crossing and picks a spot behind the wall.
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use skulk::prelude::*;
use skulk_examples::{init_tracing, WallWorld};

struct PrintingNav;

impl NavigationExecutor for PrintingNav {
    fn set_destination(&mut self, destination: Vec3) {
        println!("navigation target: {destination}");
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let agent_id = AgentId(1);
    // A wall just north of the agent, spanning x in [-6, 6] at z = 2.
    let world = WallWorld::new(AgentId(100)).with_wall(Vec2::new(-6.0, 2.0), Vec2::new(6.0, 2.0));
    let oracle = RaycastVisibility::new(world);

    let config = SelectorConfig::new(Vec2::new(20.0, 20.0))
        .with_min_distance(3.0)
        .with_range(10.0);
    let mut controller = EvasionController::try_new(config, agent_id)?;

    let agent = Vec3::ZERO;
    let mut nav = PrintingNav;
    let mut rng = StdRng::seed_from_u64(42);

    // Observer approaches from the north in 2-unit steps.
    for step in 0..8 {
        let observer = Vec3::new(0.0, 0.0, 20.0 - step as f32 * 2.0);
        let selection = controller.tick(agent, Vec3::X, observer, &oracle, &mut nav, &mut rng)?;

        match selection {
            Some(Selection::Concealed(point)) => {
                println!("tick {step}: observer at z={:.1}, hiding at {point}", observer.z);
            }
            Some(Selection::Flee(point)) => {
                println!("tick {step}: observer at z={:.1}, fleeing to {point}", observer.z);
            }
            None => println!("tick {step}: observer at z={:.1}, no trigger", observer.z),
        }
    }

    Ok(())
}
