//! Monitoring alarm teardown (autoscaling feature)

use crate::api::session::Session;
use anyhow::Result;

pub struct MonitoringClient {
    session: Session,
    base: String,
}

impl MonitoringClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.monitoring_endpoint(),
        }
    }
}

#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait MonitoringOps: Send + Sync {
    /// Delete an alarm and wait until it reaches DELETED
    async fn delete_alarm(&self, alarm_id: &str) -> Result<()>;
}

impl MonitoringOps for MonitoringClient {
    async fn delete_alarm(&self, alarm_id: &str) -> Result<()> {
        let url = format!("{}/alarms/{}", self.base, alarm_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("alarm {alarm_id}"))
            .await
    }
}
