//! Identity teardown: policies, dynamic groups, tag namespaces
//!
//! Tag namespaces have the one genuinely stateful delete in the sweep: a
//! namespace must be retired (and reach INACTIVE) before its cascading
//! delete may be requested. The cascading delete itself runs asynchronously
//! on the provider side and is never waited on.

use crate::api::session::Session;
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

/// Dynamic group summary for the prefix-matched teardown step
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicGroupInfo {
    pub id: String,
    pub name: String,
}

/// Tag namespace retirement status
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagNamespaceInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub is_retired: bool,
}

/// Identity client
pub struct IdentityClient {
    session: Session,
    base: String,
}

impl IdentityClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.identity_endpoint(),
        }
    }
}

/// Identity operations used by the sweep, mockable in tests
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait IdentityOps: Send + Sync {
    /// Delete a policy and wait until it reaches DELETED
    async fn delete_policy(&self, policy_id: &str) -> Result<()>;

    /// List all dynamic groups of a tenancy
    async fn list_dynamic_groups(&self, tenancy_id: &str) -> Result<Vec<DynamicGroupInfo>>;

    /// Delete a dynamic group and wait until it reaches DELETED
    async fn delete_dynamic_group(&self, group_id: &str) -> Result<()>;

    /// Fetch a tag namespace's retirement status
    async fn get_tag_namespace(&self, namespace_id: &str) -> Result<TagNamespaceInfo>;

    /// Retire a tag namespace and wait until it reaches INACTIVE
    async fn retire_tag_namespace(&self, namespace_id: &str) -> Result<()>;

    /// Request the cascading delete of a retired namespace.
    ///
    /// Fire-and-forget: the provider deletes the namespace and all its tag
    /// definitions asynchronously, which can take arbitrarily long.
    async fn cascade_delete_tag_namespace(&self, namespace_id: &str) -> Result<()>;
}

impl IdentityOps for IdentityClient {
    async fn delete_policy(&self, policy_id: &str) -> Result<()> {
        let url = format!("{}/policies/{}", self.base, policy_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("policy {policy_id}"))
            .await
    }

    async fn list_dynamic_groups(&self, tenancy_id: &str) -> Result<Vec<DynamicGroupInfo>> {
        let url = format!("{}/dynamicGroups", self.base);
        self.session
            .get_list(&url, &[("compartmentId", tenancy_id)])
            .await
    }

    async fn delete_dynamic_group(&self, group_id: &str) -> Result<()> {
        let url = format!("{}/dynamicGroups/{}", self.base, group_id);
        self.session
            .delete_and_wait(&url, &["DELETED"], &format!("dynamic group {group_id}"))
            .await
    }

    async fn get_tag_namespace(&self, namespace_id: &str) -> Result<TagNamespaceInfo> {
        let url = format!("{}/tagNamespaces/{}", self.base, namespace_id);
        self.session.get_json(&url).await
    }

    async fn retire_tag_namespace(&self, namespace_id: &str) -> Result<()> {
        let url = format!("{}/tagNamespaces/{}", self.base, namespace_id);
        self.session.put_json(&url, &json!({ "isRetired": true })).await?;
        self.session
            .wait_until_state(&url, "INACTIVE", &format!("tag namespace {namespace_id}"))
            .await
    }

    async fn cascade_delete_tag_namespace(&self, namespace_id: &str) -> Result<()> {
        let url = format!(
            "{}/tagNamespaces/{}/actions/cascadeDelete",
            self.base, namespace_id
        );
        self.session.post_action(&url).await
    }
}
