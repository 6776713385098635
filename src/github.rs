use crate::config::DashboardConfig;
use crate::errors::DashboardError;
use crate::models::Commit;
use crate::page::PageStatus;
use chrono::DateTime;
use futures::future::join_all;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct RawCommit {
    commit: RawCommitDetail,
    author: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawCommitDetail {
    message: String,
    author: RawGitAuthor,
    tree: RawTreeRef,
}

#[derive(Debug, Deserialize)]
struct RawGitAuthor {
    name: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawTreeRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RawBranch {
    commit: RawBranchCommit,
}

#[derive(Debug, Deserialize)]
struct RawBranchCommit {
    commit: RawBranchCommitDetail,
}

#[derive(Debug, Deserialize)]
struct RawBranchCommitDetail {
    tree: RawTreeRef,
}

#[derive(Debug, Deserialize)]
struct RawTree {
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct RawPull {
    head: RawHead,
}

#[derive(Debug, Deserialize)]
struct RawHead {
    #[serde(rename = "ref")]
    branch: String,
}

#[derive(Debug, Deserialize)]
struct RawCompare {
    #[serde(default)]
    files: Vec<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    config: Arc<DashboardConfig>,
}

impl GithubClient {
    pub fn new(config: Arc<DashboardConfig>) -> Result<Self, DashboardError> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// GETs `url` and decodes the body. Anything other than a 200 hides the
    /// loader and appends the no-data notice before failing.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        page: &PageStatus,
    ) -> Result<T, DashboardError> {
        debug!(%url, "fetching");
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, "request failed: {err}");
                page.report_no_data();
                return Err(DashboardError::NoData { url: url.to_string() });
            }
        };

        if response.status() != StatusCode::OK {
            warn!(%url, status = %response.status(), "no data");
            page.report_no_data();
            return Err(DashboardError::NoData { url: url.to_string() });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get_commits(&self, page: &PageStatus) -> Result<Vec<Commit>, DashboardError> {
        let raw: Vec<RawCommit> = self
            .fetch_json(&self.config.repo_url("/commits"), page)
            .await?;

        raw.into_iter()
            .map(|item| {
                let date = format_commit_date(&item.commit.author.date)?;
                Ok(Commit {
                    author: item
                        .author
                        .map(|user| user.login)
                        .unwrap_or(item.commit.author.name),
                    message: item.commit.message,
                    date,
                    tree_sha: item.commit.tree.sha,
                })
            })
            .collect()
    }

    pub async fn get_repo_tree_sha(&self, page: &PageStatus) -> Result<String, DashboardError> {
        let path = format!("/branches/{}", self.config.branch);
        let branch: RawBranch = self.fetch_json(&self.config.repo_url(&path), page).await?;
        Ok(branch.commit.commit.tree.sha)
    }

    pub async fn get_tree_folders(
        &self,
        sha: &str,
        page: &PageStatus,
    ) -> Result<Vec<TreeEntry>, DashboardError> {
        let path = format!("/git/trees/{sha}");
        let tree: RawTree = self.fetch_json(&self.config.repo_url(&path), page).await?;
        Ok(tree
            .tree
            .into_iter()
            .filter(|entry| entry.kind == "tree")
            .collect())
    }

    pub async fn count_tree_folders(&self, sha: &str, page: &PageStatus) -> Result<u32, DashboardError> {
        let folders = self.get_tree_folders(sha, page).await?;
        Ok(folders.len() as u32 + self.config.folder_offset)
    }

    pub async fn fetch_tree_folder_count(&self, page: &PageStatus) -> Result<u32, DashboardError> {
        let sha = self.get_repo_tree_sha(page).await?;
        let done = self.count_tree_folders(&sha, page).await?;
        info!(done, "counted merged exercises");
        Ok(done)
    }

    pub async fn fetch_review_count(&self, page: &PageStatus) -> Result<f64, DashboardError> {
        let pulls: Vec<RawPull> = self.fetch_json(&self.config.repo_url("/pulls"), page).await?;

        let per_pull = join_all(pulls.iter().map(|pull| async move {
            let path = format!("/compare/{}...{}", self.config.branch, pull.head.branch);
            let compare: RawCompare = self.fetch_json(&self.config.repo_url(&path), page).await?;
            Ok::<f64, DashboardError>(compare.files.len() as f64 / self.config.files_per_exercise)
        }))
        .await;

        let mut review = 0.0;
        for estimate in per_pull {
            review += estimate?;
        }
        info!(pulls = pulls.len(), review, "estimated exercises in review");
        Ok(review)
    }
}

pub fn format_commit_date(raw: &str) -> Result<String, DashboardError> {
    let parsed = DateTime::parse_from_rfc3339(raw).map_err(|source| DashboardError::Date {
        raw: raw.to_string(),
        source,
    })?;
    Ok(parsed.format("%d-%m").to_string())
}
