#![forbid(unsafe_code)]
//! skulk: concealment-point selection for agents evading an observer.
//!
//! Modules:
//! - sampling: blue-noise candidate generation (Poisson disk)
//! - visibility: line-of-sight oracle contract and raycast adapter
//! - evasion: hiding-spot selection, fallback policy, and the per-agent
//!   trigger state machine
//!
//! The crate owns the sampling-and-selection algorithm only; path execution
//! toward the chosen point and the ray/geometry intersection backend are
//! external collaborators behind the [`evasion::controller::NavigationExecutor`]
//! and [`visibility::VisibilityOracle`] seams.
pub mod error;
pub mod evasion;
pub mod sampling;
pub mod visibility;

/// Convenient re-exports for common types. Import with `use skulk::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::evasion::controller::{EvasionController, EvasionState, NavigationExecutor};
    pub use crate::evasion::selector::{select_spot, Selection, SelectorConfig, SpotQuery};
    pub use crate::sampling::{PoissonDiskSampling, PositionSampling};
    pub use crate::visibility::raycast::{RaycastVisibility, RayHit, SegmentCaster};
    pub use crate::visibility::{AgentId, VisibilityOracle};
}
