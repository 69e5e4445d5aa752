use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::model::WeeklyPlan;

/// ISO 8601 week coordinates for a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekInfo {
    pub year: i32,
    pub week: u32,
    /// `"YYYY-Www"` label used as the plan lookup key.
    pub iso_week: String,
}

pub fn week_of(date: NaiveDate) -> WeekInfo {
    let iso = date.iso_week();
    WeekInfo {
        year: iso.year(),
        week: iso.week(),
        iso_week: format!("{}-W{:02}", iso.year(), iso.week()),
    }
}

/// Save a selection as the plan for the week containing `now`. An existing
/// plan for that week keeps its `plan_id` and `created_at` and gets its
/// recipes and `updated_at` replaced; otherwise a new plan is appended with
/// `plan_id` taken from the millisecond timestamp.
pub fn upsert_week(
    plans: &mut Vec<WeeklyPlan>,
    recipe_ids: Vec<String>,
    now: DateTime<Utc>,
) -> WeeklyPlan {
    let info = week_of(now.date_naive());

    if let Some(plan) = plans.iter_mut().find(|p| p.iso_week == info.iso_week) {
        plan.recipe_ids = recipe_ids;
        plan.updated_at = now;
        return plan.clone();
    }

    let plan = WeeklyPlan {
        plan_id: now.timestamp_millis(),
        iso_week: info.iso_week,
        year: info.year,
        week: info.week,
        recipe_ids,
        created_at: now,
        updated_at: now,
    };
    plans.push(plan.clone());
    plan
}
