//! Progression evaluation for the Sprout goal tree.
//!
//! This crate decides when a micro-habit has been practiced reliably enough
//! to graduate to a harder variant:
//!
//! - [`AdvanceConfig`] / [`Strategy`]: the `advance.*` settings consumed as
//!   a flat key→value map.
//! - [`Progression`]: the evaluator (`should_advance` + `explain`), with an
//!   injected [`Clock`].
//! - [`ProgressionService`]: goal-level wrapper over the active micro-habit
//!   lookup.
//! - [`TalkPool`]: pep-talk templates for check-in messages.

mod clock;
mod config;
mod progression;
mod service;
mod talks;

pub use clock::{Clock, DEBUG_DATE_VAR, FixedClock, SystemClock};
pub use config::{
    AdvanceConfig, STREAK_DEFAULT, Strategy, StrategyParseError, THRESHOLD_DEFAULT, WINDOW_DEFAULT,
};
pub use progression::Progression;
pub use service::ProgressionService;
pub use talks::{FALLBACK_TALK, TalkPool, TalkPoolError};
