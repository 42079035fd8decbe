use crate::models::{
    Consistency, DayProgress, HabitStats, StatsResponse, StreakData, StreakStatus, TrackerState,
    WeekSelection, WeeklyPoint,
};
use chrono::{Datelike, Duration, Local, NaiveDate};

const TREND_WINDOW: usize = 7;
const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn build_stats(state: &TrackerState, week: WeekSelection) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), state, week)
}

pub fn build_stats_at(today: NaiveDate, state: &TrackerState, week: WeekSelection) -> StatsResponse {
    let matrix = &state.completion_matrix;
    let total_days = state.total_days as usize;

    let completed_cells = completed_cells(matrix);
    let total_cells = state.habits.len() * total_days;
    let progress_percentage = percentage(completed_cells, total_cells);

    let today_index = state
        .start_date
        .map(|start| today_index(start, today))
        .unwrap_or(-1);
    let streaks = if state.habits.is_empty() || total_days == 0 {
        StreakData {
            current: 0,
            best: 0,
            status: StreakStatus::Low,
        }
    } else {
        let current = current_streak(matrix, today_index, total_days);
        StreakData {
            current,
            best: best_streak(matrix, total_days),
            status: streak_status(current),
        }
    };

    let per_habit = state
        .habits
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let row = matrix.get(index).map(Vec::as_slice).unwrap_or(&[]);
            habit_stats(name, row, total_days)
        })
        .collect();

    let weekly_activity = match state.start_date {
        Some(start) => weekly_activity(matrix, start, total_days, today, week),
        None => Vec::new(),
    };

    StatsResponse {
        completed_cells,
        total_cells,
        progress_percentage,
        completed_days: completed_days(matrix, total_days),
        per_habit,
        encouragement: encouragement(&streaks, progress_percentage).to_string(),
        streaks,
        week,
        weekly_activity,
    }
}

/// Whole days from `start` to `today`. Negative before the challenge starts.
pub fn today_index(start: NaiveDate, today: NaiveDate) -> i64 {
    (today - start).num_days()
}

pub fn completed_cells(matrix: &[Vec<bool>]) -> usize {
    matrix
        .iter()
        .map(|row| row.iter().filter(|done| **done).count())
        .sum()
}

/// `round(part / whole * 100)`, or 0 for an empty whole.
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let ratio = (part as f64 / whole as f64 * 100.0).round();
    ratio.clamp(0.0, 100.0) as u8
}

pub fn day_progress(matrix: &[Vec<bool>], day: usize) -> DayProgress {
    DayProgress {
        completed: habits_done_on(matrix, day),
        total: matrix.len(),
    }
}

pub fn completed_days(matrix: &[Vec<bool>], total_days: usize) -> usize {
    (0..total_days).filter(|day| day_counts(matrix, *day)).count()
}

pub fn current_streak(matrix: &[Vec<bool>], today_index: i64, total_days: usize) -> u32 {
    if today_index < 0 || total_days == 0 {
        return 0;
    }
    let last = (today_index as usize).min(total_days - 1);
    (0..=last)
        .rev()
        .take_while(|day| day_counts(matrix, *day))
        .count() as u32
}

pub fn best_streak(matrix: &[Vec<bool>], total_days: usize) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    for day in 0..total_days {
        if day_counts(matrix, day) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

pub fn streak_status(current: u32) -> StreakStatus {
    if current >= 7 {
        StreakStatus::Strong
    } else if current >= 3 {
        StreakStatus::Growing
    } else {
        StreakStatus::Low
    }
}

pub fn habit_stats(name: &str, row: &[bool], total_days: usize) -> HabitStats {
    let active_days = row.iter().filter(|done| **done).count();
    HabitStats {
        name: name.to_string(),
        progress: percentage(active_days, total_days),
        consistency: consistency(row),
        active_days,
    }
}

/// Compares the last seven entries against the (up to) seven before them.
pub fn consistency(row: &[bool]) -> Consistency {
    if row.len() < TREND_WINDOW {
        return if row.iter().any(|done| *done) {
            Consistency::Steady
        } else {
            Consistency::Starting
        };
    }

    let split = row.len() - TREND_WINDOW;
    let earlier_start = split.saturating_sub(TREND_WINDOW);
    let recent = row[split..].iter().filter(|done| **done).count();
    let earlier = row[earlier_start..split].iter().filter(|done| **done).count();

    if recent > earlier {
        Consistency::Improving
    } else if recent == earlier && recent > 0 {
        Consistency::Steady
    } else {
        Consistency::Starting
    }
}

/// Completions per day for the Sunday-based week, skipping empty days.
pub fn weekly_activity(
    matrix: &[Vec<bool>],
    start: NaiveDate,
    total_days: usize,
    today: NaiveDate,
    week: WeekSelection,
) -> Vec<WeeklyPoint> {
    let mut week_start = week_start(today);
    if week == WeekSelection::Last {
        week_start -= Duration::weeks(1);
    }

    let mut points = Vec::new();
    for (offset, label) in WEEKDAY_LABELS.iter().enumerate() {
        let date = week_start + Duration::days(offset as i64);
        let index = today_index(start, date);
        if index < 0 || index >= total_days as i64 {
            continue;
        }
        let count = habits_done_on(matrix, index as usize);
        if count > 0 {
            points.push(WeeklyPoint {
                day: (*label).to_string(),
                date: date.to_string(),
                count,
            });
        }
    }
    points
}

pub fn encouragement(streaks: &StreakData, progress_percentage: u8) -> &'static str {
    if streaks.current >= 7 {
        "You're on fire! Keep the momentum going!"
    } else if streaks.current >= 3 {
        "You're building consistency! Every day counts."
    } else if progress_percentage >= 70 {
        "You're doing great! Keep up the amazing work!"
    } else if progress_percentage >= 50 {
        "You're making progress! Every small step counts!"
    } else if streaks.current > 0 {
        "You're improving day by day! Keep going!"
    } else {
        "Every journey starts with a single step! You've got this!"
    }
}

fn habits_done_on(matrix: &[Vec<bool>], day: usize) -> usize {
    matrix
        .iter()
        .filter(|row| row.get(day).copied().unwrap_or(false))
        .count()
}

fn day_counts(matrix: &[Vec<bool>], day: usize) -> bool {
    matrix.iter().any(|row| row.get(day).copied().unwrap_or(false))
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}
