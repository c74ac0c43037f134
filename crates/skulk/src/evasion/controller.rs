//! Per-agent trigger for hiding-spot selection.
//!
//! The controller watches the observer distance each tick and runs one
//! selection when the observer crosses into range, forwarding the chosen
//! destination to the navigation executor. Selection fires on the crossing
//! edge only; while the observer stays in range no re-sampling happens, and
//! leaving range re-arms the trigger.
use glam::Vec3;
use rand::RngCore;
use tracing::debug;

use crate::error::Result;
use crate::evasion::selector::{select_spot, Selection, SelectorConfig, SpotQuery};
use crate::visibility::{AgentId, VisibilityOracle};

/// External locomotion collaborator consuming selected destinations.
///
/// Path planning and reachability are its concern; a destination handed over
/// here may be geometrically valid yet unreachable.
pub trait NavigationExecutor {
    fn set_destination(&mut self, destination: Vec3);
}

/// Selection lifecycle of a single agent.
///
/// `Evaluating` is held only for the duration of one selection call; at most
/// one selection is in flight per agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvasionState {
    #[default]
    Idle,
    Evaluating,
}

/// Drives hiding-spot selection for one agent.
pub struct EvasionController {
    /// Selection configuration applied on every trigger.
    pub config: SelectorConfig,
    /// Identity of the driven agent, excluded from obstruction hits.
    pub agent_id: AgentId,
    state: EvasionState,
    observer_in_range: bool,
}

impl EvasionController {
    pub fn try_new(config: SelectorConfig, agent_id: AgentId) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            agent_id,
            state: EvasionState::Idle,
            observer_in_range: false,
        })
    }

    pub fn state(&self) -> EvasionState {
        self.state
    }

    /// Advances the trigger by one tick.
    ///
    /// Runs a selection and forwards its destination to `nav` when the
    /// observer has just entered `config.range`; otherwise returns
    /// `Ok(None)`. A selection error resets the controller to [`EvasionState::Idle`]
    /// before propagating.
    pub fn tick<R: RngCore>(
        &mut self,
        agent: Vec3,
        facing: Vec3,
        observer: Vec3,
        oracle: &dyn VisibilityOracle,
        nav: &mut dyn NavigationExecutor,
        rng: &mut R,
    ) -> Result<Option<Selection>> {
        if agent.distance(observer) > self.config.range {
            self.observer_in_range = false;
            return Ok(None);
        }

        let entered = !self.observer_in_range;
        self.observer_in_range = true;

        if !entered || self.state != EvasionState::Idle {
            return Ok(None);
        }

        self.state = EvasionState::Evaluating;
        let query = SpotQuery::new(agent, observer, self.agent_id).with_facing(facing);
        let result = select_spot(&self.config, oracle, &query, rng);
        self.state = EvasionState::Idle;

        let selection = result?;
        debug!(
            concealed = selection.is_concealed(),
            "Forwarding evasion destination to navigation."
        );
        nav.set_destination(selection.destination());
        Ok(Some(selection))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::Error;

    struct AllVisible;

    impl VisibilityOracle for AllVisible {
        fn is_visible(&self, _eye: Vec3, _target: Vec3, _querier: AgentId) -> Result<bool> {
            Ok(true)
        }
    }

    #[derive(Default)]
    struct RecordingNav {
        destinations: Vec<Vec3>,
    }

    impl NavigationExecutor for RecordingNav {
        fn set_destination(&mut self, destination: Vec3) {
            self.destinations.push(destination);
        }
    }

    fn controller() -> EvasionController {
        EvasionController::try_new(SelectorConfig::default(), AgentId(1)).unwrap()
    }

    #[test]
    fn try_new_rejects_invalid_config() {
        let config = SelectorConfig::new(Vec2::new(0.0, 20.0));
        assert!(matches!(
            EvasionController::try_new(config, AgentId(1)),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn triggers_only_on_range_crossing() {
        let mut controller = controller();
        let mut nav = RecordingNav::default();
        let mut rng = StdRng::seed_from_u64(42);
        let agent = Vec3::ZERO;
        let far = Vec3::new(50.0, 0.0, 0.0);
        let near = Vec3::new(5.0, 0.0, 0.0);

        let out_of_range = controller
            .tick(agent, Vec3::X, far, &AllVisible, &mut nav, &mut rng)
            .unwrap();
        assert!(out_of_range.is_none());

        let entered = controller
            .tick(agent, Vec3::X, near, &AllVisible, &mut nav, &mut rng)
            .unwrap();
        assert!(entered.is_some());

        // Still in range: no re-sampling.
        let still_near = controller
            .tick(agent, Vec3::X, near, &AllVisible, &mut nav, &mut rng)
            .unwrap();
        assert!(still_near.is_none());

        // Leaving range re-arms the trigger.
        controller
            .tick(agent, Vec3::X, far, &AllVisible, &mut nav, &mut rng)
            .unwrap();
        let reentered = controller
            .tick(agent, Vec3::X, near, &AllVisible, &mut nav, &mut rng)
            .unwrap();
        assert!(reentered.is_some());

        assert_eq!(nav.destinations.len(), 2);
    }

    #[test]
    fn forwards_selected_destination_to_navigation() {
        let mut controller = controller();
        let mut nav = RecordingNav::default();
        let mut rng = StdRng::seed_from_u64(42);

        let selection = controller
            .tick(
                Vec3::ZERO,
                Vec3::X,
                Vec3::new(5.0, 0.0, 5.0),
                &AllVisible,
                &mut nav,
                &mut rng,
            )
            .unwrap()
            .expect("selection on range entry");

        assert_eq!(nav.destinations, vec![selection.destination()]);
    }

    #[test]
    fn returns_to_idle_after_selection() {
        let mut controller = controller();
        let mut nav = RecordingNav::default();
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(controller.state(), EvasionState::Idle);
        controller
            .tick(
                Vec3::ZERO,
                Vec3::X,
                Vec3::new(5.0, 0.0, 5.0),
                &AllVisible,
                &mut nav,
                &mut rng,
            )
            .unwrap();
        assert_eq!(controller.state(), EvasionState::Idle);
    }
}
