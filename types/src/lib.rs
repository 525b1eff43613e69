//! Core domain types for Sprout - no IO, no async.
//!
//! The goal tree (goal area → phase → micro-habit → check-in) and its
//! structural invariants live here. Evaluation and persistence build on
//! these types from the `sprout-core` and `sprout-storage` crates.

mod id;
mod model;

pub use id::NodeId;
pub use model::{CheckIn, GoalArea, MicroHabit, NameError, Phase, Status};
