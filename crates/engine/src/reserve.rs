//! Goals reserve strategies.
//!
//! The amount set aside for goals is subtracted from net investable assets
//! before the FI comparison. The default is the single configured placeholder
//! amount; `SumOfGoals` derives it from the owner's goal records instead.

use finagent_common::config::{AppConfig, GoalsReserveStrategy};
use finagent_common::types::Goal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalsReserve {
    /// A configured amount, independent of any goal records.
    Fixed(f64),
    /// Sum of `target_amount` across the owner's goals.
    SumOfGoals,
}

impl GoalsReserve {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.goals_reserve_strategy {
            GoalsReserveStrategy::Fixed => GoalsReserve::Fixed(config.goals_reserve_amount),
            GoalsReserveStrategy::Goals => GoalsReserve::SumOfGoals,
        }
    }

    /// Whether goal records must be loaded to compute the reserve.
    pub fn needs_goals(&self) -> bool {
        matches!(self, GoalsReserve::SumOfGoals)
    }

    pub fn amount(&self, goals: &[Goal]) -> f64 {
        match self {
            GoalsReserve::Fixed(amount) => *amount,
            GoalsReserve::SumOfGoals => goals.iter().fold(0.0, |acc, g| acc + g.target_amount),
        }
    }
}

impl Default for GoalsReserve {
    fn default() -> Self {
        GoalsReserve::Fixed(finagent_common::config::DEFAULT_GOALS_RESERVE_AMOUNT)
    }
}
