use crate::cache::fetch_and_cache;
use crate::colors::{self, ColorSetting};
use crate::errors::AppError;
use crate::models::{CachedDashboard, ColorRequest};
use crate::page::{PageStatus, PaintResponse};
use crate::state::AppState;
use crate::ui::{paint, render_scaffold};
use axum::{extract::State, response::Html, Json};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let colors = colors::resolve(&state.store).await;
    Html(render_scaffold(state.config.goal_amount, &colors))
}

pub async fn get_paint(State(state): State<AppState>) -> Json<PaintResponse> {
    let page = PageStatus::new();
    match fetch_and_cache(&state, &page).await {
        Ok(dashboard) => {
            page.show_content();
            Json(paint(&dashboard, state.config.goal_amount, page.snapshot()))
        }
        Err(err) => {
            warn!("dashboard load failed: {err}");
            Json(PaintResponse::degraded(page.snapshot()))
        }
    }
}

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<CachedDashboard>, AppError> {
    let page = PageStatus::new();
    let dashboard = fetch_and_cache(&state, &page).await?;
    Ok(Json(dashboard))
}

pub async fn get_colors(State(state): State<AppState>) -> Json<Vec<ColorSetting>> {
    Json(colors::resolve(&state.store).await)
}

pub async fn set_color(
    State(state): State<AppState>,
    Json(payload): Json<ColorRequest>,
) -> Result<Json<ColorSetting>, AppError> {
    let (key, hue) = colors::validate_request(&payload.key, payload.hue)?;
    let setting = colors::persist(&state.store, key, hue).await?;
    info!(key = key.as_str(), css = %setting.css, "color saved");
    Ok(Json(setting))
}
