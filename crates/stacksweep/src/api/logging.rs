//! Logging teardown: agent configurations, logs, log groups

use crate::api::session::Session;
use anyhow::Result;
use serde::Deserialize;

/// Log summary inside a log group
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInfo {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Logging management client
pub struct LoggingClient {
    session: Session,
    base: String,
}

impl LoggingClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.logging_endpoint(),
        }
    }
}

/// Logging operations used by the sweep, mockable in tests
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait LoggingOps: Send + Sync {
    /// Delete a unified agent configuration and wait until it is gone
    async fn delete_unified_agent_configuration(&self, config_id: &str) -> Result<()>;

    /// List the logs inside a log group
    async fn list_logs(&self, log_group_id: &str) -> Result<Vec<LogInfo>>;

    /// Delete one log and wait until it is gone
    async fn delete_log(&self, log_group_id: &str, log_id: &str) -> Result<()>;

    /// Delete an (empty) log group and wait until it is gone
    async fn delete_log_group(&self, log_group_id: &str) -> Result<()>;
}

impl LoggingOps for LoggingClient {
    async fn delete_unified_agent_configuration(&self, config_id: &str) -> Result<()> {
        let url = format!("{}/unifiedAgentConfigurations/{}", self.base, config_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("agent configuration {config_id}"))
            .await
    }

    async fn list_logs(&self, log_group_id: &str) -> Result<Vec<LogInfo>> {
        let url = format!("{}/logGroups/{}/logs", self.base, log_group_id);
        self.session.get_list(&url, &[]).await
    }

    async fn delete_log(&self, log_group_id: &str, log_id: &str) -> Result<()> {
        let url = format!("{}/logGroups/{}/logs/{}", self.base, log_group_id, log_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("log {log_id}"))
            .await
    }

    async fn delete_log_group(&self, log_group_id: &str) -> Result<()> {
        let url = format!("{}/logGroups/{}", self.base, log_group_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("log group {log_group_id}"))
            .await
    }
}
