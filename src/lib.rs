pub mod app;
pub mod cache;
pub mod colors;
pub mod config;
pub mod errors;
pub mod github;
pub mod handlers;
pub mod models;
pub mod page;
pub mod state;
pub mod stats;
pub mod storage;
pub mod svg;
pub mod ui;

pub use app::router;
pub use cache::{fetch_and_cache, fetch_and_cache_at};
pub use config::DashboardConfig;
pub use state::AppState;
