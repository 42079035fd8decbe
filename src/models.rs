use crate::tracker::{fits_calendar, MAX_DAYS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The single persisted snapshot. Field names match the stored JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackerState {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_days: u32,
    #[serde(default)]
    pub habits: Vec<String>,
    #[serde(default)]
    pub completion_matrix: Vec<Vec<bool>>,
}

impl TrackerState {
    pub fn is_setup(&self) -> bool {
        self.start_date.is_some() && self.total_days > 0
    }

    /// One row per habit, every row `total_days` long, and the day range
    /// within the limits setup accepts.
    pub fn is_well_formed(&self) -> bool {
        let range_ok = self.total_days <= MAX_DAYS
            && self
                .start_date
                .is_none_or(|start| fits_calendar(start, self.total_days));

        range_ok
            && self.completion_matrix.len() == self.habits.len()
            && self
                .completion_matrix
                .iter()
                .all(|row| row.len() == self.total_days as usize)
    }
}

#[derive(Debug, Deserialize)]
pub struct SetupRequest {
    pub start_date: NaiveDate,
    pub total_days: u32,
    pub habits: Vec<String>,
}

/// Plain HTML form body for setup; habits are one per line.
#[derive(Debug, Deserialize)]
pub struct SetupForm {
    pub start_date: String,
    #[serde(default)]
    pub total_days: String,
    #[serde(default)]
    pub custom_days: String,
    #[serde(default)]
    pub habits: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub habit: usize,
    pub day: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddHabitRequest {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekSelection {
    #[default]
    This,
    Last,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub week: WeekSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TodayStatus {
    NotStarted {
        starts_on: NaiveDate,
    },
    InProgress {
        day: usize,
        completed: usize,
        total: usize,
        all_done: bool,
    },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakStatus {
    Low,
    Growing,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakData {
    pub current: u32,
    pub best: u32,
    pub status: StreakStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consistency {
    Improving,
    Steady,
    Starting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    pub name: String,
    pub progress: u8,
    pub consistency: Consistency,
    pub active_days: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub day: String,
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub completed_cells: usize,
    pub total_cells: usize,
    pub progress_percentage: u8,
    pub completed_days: usize,
    pub per_habit: Vec<HabitStats>,
    pub streaks: StreakData,
    pub week: WeekSelection,
    pub weekly_activity: Vec<WeeklyPoint>,
    pub encouragement: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackerResponse {
    pub is_setup: bool,
    pub start_date: Option<NaiveDate>,
    pub total_days: u32,
    pub habits: Vec<String>,
    pub completion_matrix: Vec<Vec<bool>>,
    pub day_dates: Vec<String>,
    pub today_index: Option<i64>,
    pub today: Option<TodayStatus>,
}
