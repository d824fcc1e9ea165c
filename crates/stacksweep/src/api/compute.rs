//! Compute instance teardown

use crate::api::session::Session;
use anyhow::Result;

/// Compute client for terminating stack instances
pub struct ComputeClient {
    session: Session,
    base: String,
}

impl ComputeClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.core_endpoint(),
        }
    }
}

/// Compute operations used by the sweep, mockable in tests
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait ComputeOps: Send + Sync {
    /// Terminate an instance and wait until it reaches TERMINATED
    async fn terminate_instance(&self, instance_id: &str) -> Result<()>;
}

impl ComputeOps for ComputeClient {
    async fn terminate_instance(&self, instance_id: &str) -> Result<()> {
        let url = format!("{}/instances/{}", self.base, instance_id);
        self.session
            .delete_and_wait(&url, &["TERMINATED"], &format!("instance {instance_id}"))
            .await
    }
}
