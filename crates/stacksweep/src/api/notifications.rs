//! Notification topic teardown (autoscaling feature)

use crate::api::session::Session;
use anyhow::Result;

pub struct NotificationsClient {
    session: Session,
    base: String,
}

impl NotificationsClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.notifications_endpoint(),
        }
    }
}

#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait NotificationsOps: Send + Sync {
    /// Request deletion of a topic (and its subscriptions).
    ///
    /// Not waited on: the provider tears the topic down asynchronously and
    /// can stay in DELETING for a long time.
    async fn delete_topic(&self, topic_id: &str) -> Result<()>;
}

impl NotificationsOps for NotificationsClient {
    async fn delete_topic(&self, topic_id: &str) -> Result<()> {
        let url = format!("{}/topics/{}", self.base, topic_id);
        self.session.delete(&url).await
    }
}
