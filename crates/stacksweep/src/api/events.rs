//! Event rule teardown (autoscaling feature)

use crate::api::session::Session;
use anyhow::Result;

pub struct EventsClient {
    session: Session,
    base: String,
}

impl EventsClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.events_endpoint(),
        }
    }
}

#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait EventsOps: Send + Sync {
    /// Delete an event rule and wait until it reaches DELETED
    async fn delete_rule(&self, rule_id: &str) -> Result<()>;
}

impl EventsOps for EventsClient {
    async fn delete_rule(&self, rule_id: &str) -> Result<()> {
        let url = format!("{}/rules/{}", self.base, rule_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("event rule {rule_id}"))
            .await
    }
}
