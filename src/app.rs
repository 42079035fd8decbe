use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/setup", post(handlers::setup_form))
        .route("/toggle/:habit/:day", post(handlers::toggle_form))
        .route("/habits", post(handlers::add_habit_form))
        .route("/reset", post(handlers::reset_form))
        .route("/api/tracker", get(handlers::get_tracker))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/setup", post(handlers::setup))
        .route("/api/toggle", post(handlers::toggle))
        .route("/api/habits", post(handlers::add_habit))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
