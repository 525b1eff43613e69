//! Automatic progression rule.
//!
//! Decides whether a micro-habit has been practiced reliably enough to be
//! superseded by a harder variant. Two strategies:
//!
//! - **ratio**: success fraction over a fixed trailing window of days. The
//!   window must be fully populated with check-ins before the ratio is even
//!   considered, and the divisor is always the configured window, not the
//!   number of check-ins found.
//! - **streak**: consecutive trailing successes ordered by date.
//!
//! Evaluation is read-only: the caller decides what the next habit is and
//! performs the actual graduation. [`Progression::explain`] produces the
//! human-readable justification and never contradicts
//! [`Progression::should_advance`].

use chrono::Days;
use sprout_types::{CheckIn, MicroHabit};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::{AdvanceConfig, Strategy};

pub struct Progression {
    config: AdvanceConfig,
    clock: Box<dyn Clock>,
}

impl Progression {
    #[must_use]
    pub fn new(config: AdvanceConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    #[must_use]
    pub fn with_clock(config: AdvanceConfig, clock: impl Clock + 'static) -> Self {
        Self {
            config,
            clock: Box::new(clock),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdvanceConfig {
        &self.config
    }

    /// True when `habit` meets the configured progression criteria.
    ///
    /// `window` and `threshold` resolve first-non-null: call argument, then
    /// the habit's own override fields, then the config. A habit with no
    /// check-ins never advances.
    #[must_use]
    pub fn should_advance(
        &self,
        habit: &MicroHabit,
        window: Option<u32>,
        threshold: Option<f64>,
    ) -> bool {
        let (window, threshold) = self.resolve(habit, window, threshold);
        match self.config.strategy {
            Strategy::Streak => {
                let streak = trailing_streak(&habit.checkins);
                debug!(habit = %habit.name, streak, target = self.config.streak_to_advance, "streak evaluation");
                streak >= self.config.streak_to_advance
            }
            Strategy::Ratio => {
                // An empty window can never be satisfied; bail before the
                // division rather than letting `n / 0.0` decide.
                if window == 0 {
                    return false;
                }
                let recent = self.within_window(&habit.checkins, window);
                if (recent.len() as u32) < window {
                    return false;
                }
                let successes = count_successes(&recent);
                debug!(habit = %habit.name, successes, window, threshold, "ratio evaluation");
                successes as f64 / f64::from(window) >= threshold
            }
        }
    }

    /// Human-readable evaluation summary, in agreement with
    /// [`Self::should_advance`] for the same arguments.
    #[must_use]
    pub fn explain(
        &self,
        habit: &MicroHabit,
        window: Option<u32>,
        threshold: Option<f64>,
    ) -> Vec<String> {
        let (window, threshold) = self.resolve(habit, window, threshold);
        if self.config.strategy == Strategy::Streak {
            let streak = trailing_streak(&habit.checkins);
            return vec![format!(
                "Current streak {streak}/{}",
                self.config.streak_to_advance
            )];
        }

        let recent = self.within_window(&habit.checkins, window);
        let successes = count_successes(&recent);
        let mut reasons = vec![format!(
            "{successes} successes in last {}/{window} days",
            recent.len()
        )];
        if (recent.len() as u32) < window {
            let remaining = window - recent.len() as u32;
            reasons.push(format!("{remaining} more day(s) needed for full window"));
        }
        let ratio = if window == 0 {
            0.0
        } else {
            successes as f64 / f64::from(window)
        };
        reasons.push(format!(
            "Success rate {:.0}% (threshold {:.0}%)",
            ratio * 100.0,
            threshold * 100.0
        ));
        reasons
    }

    fn resolve(
        &self,
        habit: &MicroHabit,
        window: Option<u32>,
        threshold: Option<f64>,
    ) -> (u32, f64) {
        (
            window
                .or(habit.advancement_window)
                .unwrap_or(self.config.window),
            threshold
                .or(habit.advancement_threshold)
                .unwrap_or(self.config.threshold),
        )
    }

    /// Check-ins dated inside the trailing window. The window includes
    /// today, so only a lower bound is applied; future-dated check-ins pass
    /// it like any other.
    fn within_window<'a>(&self, checkins: &'a [CheckIn], window: u32) -> Vec<&'a CheckIn> {
        let cutoff = self
            .clock
            .today()
            .checked_sub_days(Days::new(u64::from(window.saturating_sub(1))))
            .unwrap_or(chrono::NaiveDate::MIN);
        checkins.iter().filter(|ci| ci.date >= cutoff).collect()
    }
}

fn count_successes(checkins: &[&CheckIn]) -> usize {
    checkins.iter().filter(|ci| ci.success).count()
}

/// Consecutive successes counting back from the most recent check-in by
/// date. Same-date duplicates keep their insertion order (stable sort).
fn trailing_streak(checkins: &[CheckIn]) -> u32 {
    let mut ordered: Vec<&CheckIn> = checkins.iter().collect();
    ordered.sort_by_key(|ci| ci.date);
    ordered.iter().rev().take_while(|ci| ci.success).count() as u32
}
