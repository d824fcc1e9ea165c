//! File storage teardown: mount targets, exports, file systems

use crate::api::session::Session;
use anyhow::Result;
use serde::Deserialize;

/// Export summary for a file system
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub id: String,
}

/// File storage client
pub struct FileStorageClient {
    session: Session,
    base: String,
}

impl FileStorageClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.file_storage_endpoint(),
        }
    }
}

/// File storage operations used by the sweep, mockable in tests
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait FileStorageOps: Send + Sync {
    /// Delete a mount target and wait until it reaches DELETED
    async fn delete_mount_target(&self, mount_target_id: &str) -> Result<()>;

    /// List a file system's exports
    async fn list_exports(&self, file_system_id: &str) -> Result<Vec<ExportInfo>>;

    /// Delete one export and wait until it reaches DELETED
    async fn delete_export(&self, export_id: &str) -> Result<()>;

    /// Delete a file system and wait until it reaches DELETED
    async fn delete_file_system(&self, file_system_id: &str) -> Result<()>;
}

impl FileStorageOps for FileStorageClient {
    async fn delete_mount_target(&self, mount_target_id: &str) -> Result<()> {
        let url = format!("{}/mountTargets/{}", self.base, mount_target_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("mount target {mount_target_id}"))
            .await
    }

    async fn list_exports(&self, file_system_id: &str) -> Result<Vec<ExportInfo>> {
        let url = format!("{}/exports", self.base);
        self.session
            .get_list(&url, &[("fileSystemId", file_system_id)])
            .await
    }

    async fn delete_export(&self, export_id: &str) -> Result<()> {
        let url = format!("{}/exports/{}", self.base, export_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("export {export_id}"))
            .await
    }

    async fn delete_file_system(&self, file_system_id: &str) -> Result<()> {
        let url = format!("{}/fileSystems/{}", self.base, file_system_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("file system {file_system_id}"))
            .await
    }
}
