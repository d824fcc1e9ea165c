//! Functions teardown: applications and the functions inside them

use crate::api::session::Session;
use anyhow::Result;
use serde::Deserialize;

/// Function summary inside an application
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

pub struct FunctionsClient {
    session: Session,
    base: String,
}

impl FunctionsClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.functions_endpoint(),
        }
    }
}

#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait FunctionsOps: Send + Sync {
    /// List the functions of an application
    async fn list_functions(&self, application_id: &str) -> Result<Vec<FunctionInfo>>;

    /// Delete one function and wait until it reaches DELETED
    async fn delete_function(&self, function_id: &str) -> Result<()>;

    /// Delete an (empty) application and wait until it reaches DELETED
    async fn delete_application(&self, application_id: &str) -> Result<()>;
}

impl FunctionsOps for FunctionsClient {
    async fn list_functions(&self, application_id: &str) -> Result<Vec<FunctionInfo>> {
        let url = format!("{}/functions", self.base);
        self.session
            .get_list(&url, &[("applicationId", application_id)])
            .await
    }

    async fn delete_function(&self, function_id: &str) -> Result<()> {
        let url = format!("{}/functions/{}", self.base, function_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("function {function_id}"))
            .await
    }

    async fn delete_application(&self, application_id: &str) -> Result<()> {
        let url = format!("{}/applications/{}", self.base, application_id);
        self.session
            .delete_and_wait(
                &url,
                &["DELETED"],
                &format!("functions application {application_id}"),
            )
            .await
    }
}
