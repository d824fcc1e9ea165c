//! Block and boot volume teardown

use crate::api::session::Session;
use anyhow::Result;

/// Block storage client for deleting stack volumes
pub struct BlockStorageClient {
    session: Session,
    base: String,
}

impl BlockStorageClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.core_endpoint(),
        }
    }
}

/// Block storage operations used by the sweep, mockable in tests
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait BlockStorageOps: Send + Sync {
    /// Delete a block volume and wait until it reaches TERMINATED
    async fn delete_volume(&self, volume_id: &str) -> Result<()>;

    /// Delete a detached boot volume and wait until it reaches TERMINATED
    async fn delete_boot_volume(&self, boot_volume_id: &str) -> Result<()>;
}

impl BlockStorageOps for BlockStorageClient {
    async fn delete_volume(&self, volume_id: &str) -> Result<()> {
        let url = format!("{}/volumes/{}", self.base, volume_id);
        self.session
            .delete_and_wait(&url, &["TERMINATED"], &format!("volume {volume_id}"))
            .await
    }

    async fn delete_boot_volume(&self, boot_volume_id: &str) -> Result<()> {
        let url = format!("{}/bootVolumes/{}", self.base, boot_volume_id);
        self.session
            .delete_and_wait(
                &url,
                &["TERMINATED"],
                &format!("boot volume {boot_volume_id}"),
            )
            .await
    }
}
