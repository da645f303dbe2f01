use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use shared::domain::{BillId, BillRecord, UserKind, UserSession};
use tokio::{fs, sync::RwLock};
use tracing::debug;

pub mod fixtures;

/// Data-access collaborator handing out raw bill records.
#[async_trait(?Send)]
pub trait BillsSource {
    async fn list_bills(&self, session: &UserSession) -> Result<Vec<BillRecord>>;
}

/// In-memory bill store, optionally loaded from and saved to a JSON array file.
#[derive(Clone, Default)]
pub struct Storage {
    bills: Arc<RwLock<Vec<BillRecord>>>,
}

impl Storage {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn from_records(bills: Vec<BillRecord>) -> Self {
        Self {
            bills: Arc::new(RwLock::new(bills)),
        }
    }

    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read bills file '{}'", path.display()))?;
        let bills: Vec<BillRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("malformed bills file '{}'", path.display()))?;
        debug!(path = %path.display(), count = bills.len(), "loaded bills");
        Ok(Self::from_records(bills))
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        ensure_parent_dir_exists(path).await?;
        let raw = serde_json::to_string_pretty(&*self.bills.read().await)?;
        fs::write(path, raw)
            .await
            .with_context(|| format!("failed to write bills file '{}'", path.display()))?;
        Ok(())
    }

    pub async fn insert(&self, bill: BillRecord) -> Result<BillId> {
        let mut bills = self.bills.write().await;
        if bills.iter().any(|existing| existing.id == bill.id) {
            return Err(anyhow!("bill {} already exists", bill.id));
        }
        let id = bill.id.clone();
        bills.push(bill);
        Ok(id)
    }

    pub async fn get_bill(&self, id: &BillId) -> Option<BillRecord> {
        self.bills
            .read()
            .await
            .iter()
            .find(|bill| &bill.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.bills.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bills.read().await.is_empty()
    }
}

#[async_trait(?Send)]
impl BillsSource for Storage {
    /// Employees only see their own bills; admins see everything.
    async fn list_bills(&self, session: &UserSession) -> Result<Vec<BillRecord>> {
        let bills = self.bills.read().await;
        let visible: Vec<BillRecord> = match session.kind {
            UserKind::Admin => bills.clone(),
            UserKind::Employee => bills
                .iter()
                .filter(|bill| bill.email.as_deref() == Some(session.email.as_str()))
                .cloned()
                .collect(),
        };
        debug!(
            email = %session.email,
            total = bills.len(),
            visible = visible.len(),
            "listed bills"
        );
        Ok(visible)
    }
}

async fn ensure_parent_dir_exists(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) else {
        return Ok(());
    };

    fs::create_dir_all(parent).await.with_context(|| {
        format!(
            "failed to create parent directory '{}' for bills file '{}'",
            parent.display(),
            path.display()
        )
    })?;

    Ok(())
}

/// Default location of the bills file relative to the working directory.
pub fn default_bills_path() -> PathBuf {
    PathBuf::from("./data/bills.json")
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
