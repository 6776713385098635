use std::{env, path::PathBuf, str::FromStr};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_REPO: &str = "augusto-mantilla/rust-exercises";
const DEFAULT_BRANCH: &str = "master";
const DEFAULT_USER_AGENT: &str = "exercise-dashboard";

pub const GOAL_AMOUNT: u32 = 90;

/// Top-level directories that exist in the repository but are not counted
/// by the tree listing as exercises.
pub const FOLDER_OFFSET: u32 = 2;

pub const FILES_PER_EXERCISE: f64 = 3.0;

pub const CACHE_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub api_url: String,
    pub repo: String,
    pub branch: String,
    pub user_agent: String,
    pub goal_amount: u32,
    pub folder_offset: u32,
    pub files_per_exercise: f64,
    pub cache_ttl_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            api_url: DEFAULT_API_URL.to_string(),
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            goal_amount: GOAL_AMOUNT,
            folder_offset: FOLDER_OFFSET,
            files_per_exercise: FILES_PER_EXERCISE,
            cache_ttl_secs: CACHE_TTL_SECS,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parsed(&lookup, "PORT", defaults.port),
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            api_url: lookup("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            repo: lookup("DASHBOARD_REPO").unwrap_or(defaults.repo),
            branch: lookup("DASHBOARD_BRANCH").unwrap_or(defaults.branch),
            user_agent: lookup("DASHBOARD_USER_AGENT").unwrap_or(defaults.user_agent),
            goal_amount: parsed(&lookup, "DASHBOARD_GOAL", defaults.goal_amount),
            folder_offset: parsed(&lookup, "DASHBOARD_FOLDER_OFFSET", defaults.folder_offset),
            files_per_exercise: parsed(
                &lookup,
                "DASHBOARD_FILES_PER_EXERCISE",
                defaults.files_per_exercise,
            ),
            cache_ttl_secs: parsed(&lookup, "DASHBOARD_CACHE_TTL_SECS", defaults.cache_ttl_secs),
        }
    }

    pub fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}{}", self.api_url, self.repo, path)
    }

    pub fn cache_ttl_ms(&self) -> i64 {
        i64::try_from(self.cache_ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
    }
}

fn parsed<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("ignoring invalid {key}={raw:?}, using default");
                default
            }
        },
        None => default,
    }
}
