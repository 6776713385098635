use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/paint", get(handlers::get_paint))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/colors", get(handlers::get_colors).post(handlers::set_color))
        .with_state(state)
}
