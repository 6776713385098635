use crate::errors::DashboardError;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error};

pub const DATA_KEY: &str = "data";
pub const EXPIRY_KEY: &str = "expiry";

#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl Store {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn set(&self, key: &str, value: impl Into<String>) -> Result<(), DashboardError> {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value.into());
        persist_entries(&self.path, &next).await?;
        *entries = next;
        Ok(())
    }

    pub async fn set_many(&self, pairs: &[(&str, String)]) -> Result<(), DashboardError> {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        for (key, value) in pairs {
            next.insert((*key).to_string(), value.clone());
        }
        persist_entries(&self.path, &next).await?;
        *entries = next;
        Ok(())
    }

    pub async fn flush(&self) -> Result<(), DashboardError> {
        let entries = self.entries.lock().await;
        persist_entries(&self.path, &entries).await
    }
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse store file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read store file: {err}");
            BTreeMap::new()
        }
    }
}

async fn persist_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), DashboardError> {
    let payload = serde_json::to_vec_pretty(entries)?;
    fs::write(path, payload).await?;
    debug!(path = %path.display(), keys = entries.len(), "store persisted");
    Ok(())
}
