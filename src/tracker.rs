use crate::errors::AppError;
use crate::models::{TodayStatus, TrackerState};
use crate::stats::{day_progress, today_index};
use chrono::{Days, NaiveDate};

pub const PRESET_DAYS: [u32; 5] = [21, 30, 60, 75, 100];
pub const MAX_DAYS: u32 = 365;

/// Builds a fresh tracker with an all-false matrix.
pub fn setup(start_date: NaiveDate, total_days: u32, habits: &[String]) -> Result<TrackerState, AppError> {
    if total_days == 0 || total_days > MAX_DAYS {
        return Err(AppError::bad_request(format!(
            "number of days must be between 1 and {MAX_DAYS}"
        )));
    }
    if !fits_calendar(start_date, total_days) {
        return Err(AppError::bad_request("Please choose an earlier start date"));
    }

    let mut names: Vec<String> = Vec::with_capacity(habits.len());
    for name in habits {
        let trimmed = name.trim();
        if trimmed.is_empty() || contains_habit(&names, trimmed) {
            continue;
        }
        names.push(trimmed.to_string());
    }
    if names.is_empty() {
        return Err(AppError::bad_request("Please enter at least one habit"));
    }

    Ok(TrackerState {
        start_date: Some(start_date),
        total_days,
        completion_matrix: vec![vec![false; total_days as usize]; names.len()],
        habits: names,
    })
}

/// Flips one cell and returns its new value.
pub fn toggle_cell(state: &mut TrackerState, habit: usize, day: usize) -> Result<bool, AppError> {
    ensure_setup(state)?;
    if day >= state.total_days as usize {
        return Err(AppError::bad_request(format!("day {day} is outside the tracker")));
    }
    let cell = state
        .completion_matrix
        .get_mut(habit)
        .and_then(|row| row.get_mut(day))
        .ok_or_else(|| AppError::bad_request(format!("habit {habit} does not exist")))?;
    *cell = !*cell;
    Ok(*cell)
}

/// Appends a habit with an empty row; existing rows are untouched.
pub fn add_habit(state: &mut TrackerState, name: &str) -> Result<String, AppError> {
    ensure_setup(state)?;
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request("Please enter a habit name"));
    }
    if contains_habit(&state.habits, trimmed) {
        return Err(AppError::bad_request("This habit already exists"));
    }

    state.habits.push(trimmed.to_string());
    state
        .completion_matrix
        .push(vec![false; state.total_days as usize]);
    Ok(trimmed.to_string())
}

pub fn reset(state: &mut TrackerState) {
    *state = TrackerState::default();
}

/// `None` when the day falls past the last representable date.
pub fn date_for_day(start: NaiveDate, day: usize) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(day as u64))
}

/// Every day of the range, including the day after it, has a calendar date.
pub fn fits_calendar(start: NaiveDate, total_days: u32) -> bool {
    start.checked_add_days(Days::new(total_days.into())).is_some()
}

pub fn today_status(state: &TrackerState, today: NaiveDate) -> Option<TodayStatus> {
    let start = state.start_date?;
    let index = today_index(start, today);
    let status = if index < 0 {
        TodayStatus::NotStarted { starts_on: start }
    } else if index >= state.total_days as i64 {
        TodayStatus::Finished
    } else {
        let day = index as usize;
        let progress = day_progress(&state.completion_matrix, day);
        TodayStatus::InProgress {
            day,
            completed: progress.completed,
            total: progress.total,
            all_done: progress.total > 0 && progress.completed == progress.total,
        }
    };
    Some(status)
}

fn ensure_setup(state: &TrackerState) -> Result<(), AppError> {
    if state.is_setup() {
        Ok(())
    } else {
        Err(AppError::bad_request("tracker is not set up"))
    }
}

fn contains_habit(habits: &[String], name: &str) -> bool {
    let needle = name.to_lowercase();
    habits.iter().any(|habit| habit.to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn setup_trims_and_dedupes_names() {
        let state = setup(
            date(2026, 1, 1),
            21,
            &names(&["  Read ", "run", "READ", "", "   ", "Run"]),
        )
        .unwrap();
        assert_eq!(state.habits, ["Read", "run"]);
        assert_eq!(state.completion_matrix.len(), 2);
        assert!(state.completion_matrix.iter().all(|row| row.len() == 21 && row.iter().all(|c| !c)));
        assert!(state.is_setup());
        assert!(state.is_well_formed());
    }

    #[test]
    fn setup_rejects_bad_input() {
        let start = date(2026, 1, 1);
        assert!(setup(start, 0, &names(&["Read"])).is_err());
        assert!(setup(start, 366, &names(&["Read"])).is_err());
        assert!(setup(start, 365, &names(&["Read"])).is_ok());
        let err = setup(start, 30, &names(&[" ", ""])).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn add_habit_appends_empty_row() {
        let mut state = setup(date(2026, 1, 1), 10, &names(&["Read"])).unwrap();
        toggle_cell(&mut state, 0, 3).unwrap();
        let before = state.completion_matrix[0].clone();

        let added = add_habit(&mut state, "  Walk ").unwrap();
        assert_eq!(added, "Walk");
        assert_eq!(state.habits, ["Read", "Walk"]);
        assert_eq!(state.completion_matrix[1], vec![false; 10]);
        assert_eq!(state.completion_matrix[0], before);
    }

    #[test]
    fn add_habit_rejects_duplicates_and_blanks() {
        let mut state = setup(date(2026, 1, 1), 10, &names(&["Read"])).unwrap();
        let snapshot = state.clone();

        let err = add_habit(&mut state, "rEAD").unwrap_err();
        assert_eq!(err.message, "This habit already exists");
        let err = add_habit(&mut state, "   ").unwrap_err();
        assert_eq!(err.message, "Please enter a habit name");
        assert_eq!(state, snapshot);
    }

    #[test]
    fn toggle_flips_and_checks_bounds() {
        let mut state = setup(date(2026, 1, 1), 3, &names(&["Read"])).unwrap();
        assert!(toggle_cell(&mut state, 0, 2).unwrap());
        assert!(!toggle_cell(&mut state, 0, 2).unwrap());
        assert!(toggle_cell(&mut state, 0, 3).is_err());
        assert!(toggle_cell(&mut state, 1, 0).is_err());
        assert!(toggle_cell(&mut TrackerState::default(), 0, 0).is_err());
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = setup(date(2026, 1, 1), 3, &names(&["Read"])).unwrap();
        reset(&mut state);
        assert_eq!(state, TrackerState::default());
        assert!(!state.is_setup());
    }

    #[test]
    fn today_status_covers_each_phase() {
        let start = date(2026, 1, 10);
        let mut state = setup(start, 5, &names(&["Read", "Walk"])).unwrap();
        toggle_cell(&mut state, 0, 1).unwrap();
        toggle_cell(&mut state, 1, 1).unwrap();

        assert_eq!(
            today_status(&state, date(2026, 1, 7)),
            Some(TodayStatus::NotStarted { starts_on: start })
        );
        assert_eq!(
            today_status(&state, date(2026, 1, 11)),
            Some(TodayStatus::InProgress {
                day: 1,
                completed: 2,
                total: 2,
                all_done: true
            })
        );
        assert_eq!(today_status(&state, date(2026, 1, 15)), Some(TodayStatus::Finished));
        assert_eq!(today_status(&TrackerState::default(), start), None);
    }

    #[test]
    fn date_for_day_offsets_from_start() {
        assert_eq!(date_for_day(date(2026, 1, 30), 3), Some(date(2026, 2, 2)));
        assert_eq!(date_for_day(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn setup_rejects_range_past_last_date() {
        let near_end = NaiveDate::MAX - Days::new(10);
        let err = setup(near_end, 365, &names(&["Read"])).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert!(setup(near_end, 9, &names(&["Read"])).is_ok());
    }
}
