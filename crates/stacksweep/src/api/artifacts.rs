//! Container repository teardown (autoscaling feature)
//!
//! Deleting a repository also deletes the container images it holds.

use crate::api::session::Session;
use anyhow::Result;

pub struct ArtifactsClient {
    session: Session,
    base: String,
}

impl ArtifactsClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.artifacts_endpoint(),
        }
    }
}

#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactsOps: Send + Sync {
    /// Delete a container repository and wait until it reaches DELETED
    async fn delete_container_repository(&self, repository_id: &str) -> Result<()>;
}

impl ArtifactsOps for ArtifactsClient {
    async fn delete_container_repository(&self, repository_id: &str) -> Result<()> {
        let url = format!("{}/container/repositories/{}", self.base, repository_id);
        self.session
            .delete_and_wait(
                &url,
                &["DELETED"],
                &format!("container repository {repository_id}"),
            )
            .await
    }
}
