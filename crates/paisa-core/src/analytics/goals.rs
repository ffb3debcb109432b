//! Savings goal projections

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::Goal;

/// What it takes to hit a goal by its target date
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalProjection {
    /// The target date has already passed
    Expired,
    OnTrack {
        days_remaining: i64,
        remaining_amount: f64,
        daily_savings_needed: f64,
        /// Thirty times the daily figure
        monthly_savings_needed: f64,
    },
}

/// Project the savings pace a goal requires from `now` on.
pub fn goal_projection(goal: &Goal, now: DateTime<Utc>) -> Result<GoalProjection> {
    let target = DateTime::parse_from_rfc3339(&goal.target_date).map_err(|e| {
        Error::InvalidInput(format!(
            "goal target_date is not a valid timestamp: {}",
            e
        ))
    })?;

    let days_remaining = (target.with_timezone(&Utc) - now).num_days();
    if days_remaining <= 0 {
        return Ok(GoalProjection::Expired);
    }

    let remaining_amount = goal.target_amount - goal.current_amount;
    let daily_savings_needed = remaining_amount / days_remaining as f64;

    Ok(GoalProjection::OnTrack {
        days_remaining,
        remaining_amount,
        daily_savings_needed,
        monthly_savings_needed: daily_savings_needed * 30.0,
    })
}
