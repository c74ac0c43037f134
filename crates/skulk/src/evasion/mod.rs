//! Evasion pipeline: hiding-spot selection and its per-agent trigger.
//!
//! [`selector`] turns a Poisson disk candidate set and a visibility oracle
//! into a single destination point; [`controller`] decides when a selection
//! runs and hands the result to the navigation executor.
pub mod controller;
pub mod selector;

/// Observer eye height above its position, in world units.
pub const DEFAULT_EYE_HEIGHT: f32 = 1.5;
