use crate::errors::AppError;
use crate::models::{
    AddHabitRequest, SetupForm, SetupRequest, StatsQuery, StatsResponse, ToggleRequest,
    TrackerResponse, TrackerState,
};
use crate::state::AppState;
use crate::stats::{build_stats_at, today_index};
use crate::storage::{clear_data, persist_data};
use crate::tracker;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let data = state.data.lock().await;
    let stats = build_stats_at(today, &data, Default::default());
    Html(render_index(&data, &stats, today))
}

pub async fn get_tracker(State(state): State<AppState>) -> Json<TrackerResponse> {
    let data = state.data.lock().await;
    Json(to_response(&data, today()))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats_at(today(), &data, query.week)))
}

pub async fn setup(
    State(state): State<AppState>,
    Json(payload): Json<SetupRequest>,
) -> Result<Json<TrackerResponse>, AppError> {
    let response = apply_setup(&state, payload).await?;
    Ok(Json(response))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<TrackerResponse>, AppError> {
    let response = apply_toggle(&state, payload.habit, payload.day).await?;
    Ok(Json(response))
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<AddHabitRequest>,
) -> Result<Json<TrackerResponse>, AppError> {
    let response = apply_add_habit(&state, &payload.name).await?;
    Ok(Json(response))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<TrackerResponse>, AppError> {
    let response = apply_reset(&state).await?;
    Ok(Json(response))
}

pub async fn setup_form(
    State(state): State<AppState>,
    Form(form): Form<SetupForm>,
) -> Result<Redirect, AppError> {
    apply_setup(&state, parse_setup_form(&form)?).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Path((habit, day)): Path<(usize, usize)>,
) -> Result<Redirect, AppError> {
    apply_toggle(&state, habit, day).await?;
    Ok(Redirect::to("/"))
}

pub async fn add_habit_form(
    State(state): State<AppState>,
    Form(payload): Form<AddHabitRequest>,
) -> Result<Redirect, AppError> {
    apply_add_habit(&state, &payload.name).await?;
    Ok(Redirect::to("/"))
}

pub async fn reset_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_reset(&state).await?;
    Ok(Redirect::to("/"))
}

async fn apply_setup(state: &AppState, request: SetupRequest) -> Result<TrackerResponse, AppError> {
    let fresh = tracker::setup(request.start_date, request.total_days, &request.habits)?;
    let mut data = state.data.lock().await;
    persist_data(&state.data_path, &fresh).await?;
    *data = fresh;

    info!(
        start_date = %request.start_date,
        total_days = data.total_days,
        habits = data.habits.len(),
        "tracker set up"
    );
    Ok(to_response(&data, today()))
}

async fn apply_toggle(state: &AppState, habit: usize, day: usize) -> Result<TrackerResponse, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let done = tracker::toggle_cell(&mut next, habit, day)?;
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(habit, day, done, "cell toggled");
    Ok(to_response(&data, today()))
}

async fn apply_add_habit(state: &AppState, name: &str) -> Result<TrackerResponse, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let added = tracker::add_habit(&mut next, name)?;
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(habit = %added, "habit added");
    Ok(to_response(&data, today()))
}

async fn apply_reset(state: &AppState) -> Result<TrackerResponse, AppError> {
    let mut data = state.data.lock().await;
    clear_data(&state.data_path).await?;
    tracker::reset(&mut data);

    info!("tracker reset");
    Ok(to_response(&data, today()))
}

fn parse_setup_form(form: &SetupForm) -> Result<SetupRequest, AppError> {
    let start_date = form
        .start_date
        .trim()
        .parse::<NaiveDate>()
        .map_err(|_| AppError::bad_request("Please choose a valid start date"))?;

    let days = if form.custom_days.trim().is_empty() {
        form.total_days.trim()
    } else {
        form.custom_days.trim()
    };
    let total_days = days
        .parse::<u32>()
        .map_err(|_| AppError::bad_request("Please enter a valid number of days"))?;

    Ok(SetupRequest {
        start_date,
        total_days,
        habits: form.habits.lines().map(str::to_string).collect(),
    })
}

fn to_response(data: &TrackerState, today: NaiveDate) -> TrackerResponse {
    let day_dates = match data.start_date {
        Some(start) => (0..data.total_days as usize)
            .filter_map(|day| tracker::date_for_day(start, day))
            .map(|date| date.to_string())
            .collect(),
        None => Vec::new(),
    };

    TrackerResponse {
        is_setup: data.is_setup(),
        start_date: data.start_date,
        total_days: data.total_days,
        habits: data.habits.clone(),
        completion_matrix: data.completion_matrix.clone(),
        day_dates,
        today_index: data.start_date.map(|start| today_index(start, today)),
        today: tracker::today_status(data, today),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
