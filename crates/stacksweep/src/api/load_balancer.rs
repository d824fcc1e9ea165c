//! Load balancer teardown

use crate::api::session::Session;
use anyhow::Result;

/// Load balancer client
pub struct LoadBalancerClient {
    session: Session,
    base: String,
}

impl LoadBalancerClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.load_balancer_endpoint(),
        }
    }
}

/// Load balancer operations used by the sweep, mockable in tests
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait LoadBalancerOps: Send + Sync {
    /// Delete a load balancer and wait until the provider has removed it
    async fn delete_load_balancer(&self, load_balancer_id: &str) -> Result<()>;
}

impl LoadBalancerOps for LoadBalancerClient {
    async fn delete_load_balancer(&self, load_balancer_id: &str) -> Result<()> {
        // Deletion runs as a provider-side work request; polling the resource
        // until it disappears is equivalent to waiting on the work request.
        let url = format!("{}/loadBalancers/{}", self.base, load_balancer_id);
        self.session
            .delete_and_wait(
                &url,
                &["DELETED"],
                &format!("load balancer {load_balancer_id}"),
            )
            .await
    }
}
