use crate::errors::DashboardError;
use crate::models::{CachedDashboard, ExercisesPerDate};
use crate::page::PageStatus;
use crate::state::AppState;
use crate::stats::build_exercises_per_date;
use crate::storage::{DATA_KEY, EXPIRY_KEY, Store};
use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info, warn};

pub async fn fetch_and_cache(state: &AppState, page: &PageStatus) -> Result<CachedDashboard, DashboardError> {
    fetch_and_cache_at(state, page, Utc::now().timestamp_millis()).await
}

pub async fn fetch_and_cache_at(
    state: &AppState,
    page: &PageStatus,
    now_ms: i64,
) -> Result<CachedDashboard, DashboardError> {
    if let Some(cached) = read_cached(&state.store, now_ms).await {
        debug!("serving cached dashboard");
        return Ok(cached);
    }

    let github = &state.github;
    let done_amount = github.fetch_tree_folder_count(page).await?;
    let review_amount = github.fetch_review_count(page).await?;
    let commits = github.get_commits(page).await?;

    let per_commit = join_all(commits.iter().map(|commit| async move {
        let exercises = github.count_tree_folders(&commit.tree_sha, page).await?;
        Ok::<_, DashboardError>(ExercisesPerDate {
            date: commit.date.clone(),
            exercises,
        })
    }))
    .await
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;

    let dashboard = CachedDashboard {
        done_amount,
        review_amount,
        exercises_per_date: build_exercises_per_date(&per_commit),
        commits,
    };

    let expiry = now_ms.saturating_add(state.config.cache_ttl_ms());
    state
        .store
        .set_many(&[
            (DATA_KEY, serde_json::to_string(&dashboard)?),
            (EXPIRY_KEY, expiry.to_string()),
        ])
        .await?;

    info!(
        commits = dashboard.commits.len(),
        dates = dashboard.exercises_per_date.len(),
        expiry,
        "dashboard refreshed"
    );
    Ok(dashboard)
}

async fn read_cached(store: &Store, now_ms: i64) -> Option<CachedDashboard> {
    let raw_expiry = store.get(EXPIRY_KEY).await?;
    let expiry = match raw_expiry.trim().parse::<i64>() {
        Ok(expiry) => expiry,
        Err(_) => {
            warn!(expiry = %raw_expiry, "ignoring unreadable cache expiry");
            return None;
        }
    };
    if expiry <= now_ms {
        debug!(expiry, now_ms, "cache expired");
        return None;
    }

    let raw = store.get(DATA_KEY).await?;
    match serde_json::from_str(&raw) {
        Ok(dashboard) => Some(dashboard),
        Err(err) => {
            warn!("ignoring unreadable cached dashboard: {err}");
            None
        }
    }
}
