//! Goal-level progression check.
//!
//! Thin wrapper that picks the goal's active micro-habit and runs the
//! evaluator against it. Decision only: marking a habit Complete and
//! choosing its successor stay with the caller.

use sprout_types::GoalArea;

use crate::progression::Progression;

pub struct ProgressionService {
    progression: Progression,
}

impl ProgressionService {
    #[must_use]
    pub fn new(progression: Progression) -> Self {
        Self { progression }
    }

    /// Evaluate the goal's active micro-habit, returning the advancement
    /// flag together with its justification. A goal with no active habit
    /// reports `false` with a single explanatory line.
    #[must_use]
    pub fn check(&self, goal: &GoalArea) -> (bool, Vec<String>) {
        let Some(habit) = goal.active_micro_habit() else {
            return (false, vec!["No active micro-goal.".to_string()]);
        };
        (
            self.progression.should_advance(habit, None, None),
            self.progression.explain(habit, None, None),
        )
    }
}
