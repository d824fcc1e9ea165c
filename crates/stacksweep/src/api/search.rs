//! Structured-search resource discovery
//!
//! Finds every resource belonging to a stack through one structured search
//! query, independent of any local state. Pages are concatenated
//! transparently; the raw result set is then narrowed by the naming
//! predicates, the live-state filter, and the excluded-type filter.
//!
//! Discovery failures are fatal: if the stack cannot be enumerated there is
//! nothing safe for the sweep to do.

use crate::api::session::Session;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stacksweep_common::defaults::{is_live_state, EXCLUDED_RESOURCE_TYPES};
use stacksweep_common::{ResourceKind, StackPrefix};
use tracing::{debug, info};

/// One discovered cloud resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedResource {
    /// Display name as shown in the console
    #[serde(default)]
    pub display_name: String,
    /// Provider resource-type tag, e.g. `Instance`, `Vcn`, `DHCPOptions`
    pub resource_type: String,
    /// Opaque provider-assigned identifier, stable for the resource's lifetime
    pub identifier: String,
    /// Coarse provider-reported status at discovery time
    #[serde(default)]
    pub lifecycle_state: String,
    /// Creation timestamp, where the provider reports one
    pub time_created: Option<DateTime<Utc>>,
}

impl TaggedResource {
    /// The kind handled by the sweep, if any
    pub fn kind(&self) -> Option<ResourceKind> {
        ResourceKind::from_search_type(&self.resource_type)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StructuredSearchDetails<'a> {
    query: String,
    #[serde(rename = "type")]
    search_type: &'a str,
    matching_context_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResourceSummaryCollection {
    #[serde(default)]
    items: Vec<TaggedResource>,
}

/// Discovers the resources of one stack
pub struct ResourceDiscovery {
    session: Session,
    prefix: StackPrefix,
}

impl ResourceDiscovery {
    pub fn new(session: Session, prefix: StackPrefix) -> Self {
        Self { session, prefix }
    }

    /// Run the structured search and return the stack's live resources.
    pub async fn list_stack_resources(&self) -> Result<Vec<TaggedResource>> {
        let url = format!("{}/resources", self.session.search_endpoint());
        let details = StructuredSearchDetails {
            query: format!(
                "query all resources where displayname =~ '{}'",
                self.prefix.as_str()
            ),
            search_type: "Structured",
            matching_context_type: "NONE",
        };

        let mut items = Vec::new();
        let mut page: Option<String> = None;
        loop {
            let (collection, next): (ResourceSummaryCollection, _) = self
                .session
                .post_json_page(&url, &details, page.as_deref())
                .await?;
            items.extend(collection.items);

            match next {
                Some(p) => page = Some(p),
                None => break,
            }
        }

        debug!(raw = items.len(), prefix = %self.prefix, "Search returned resources");
        let resources = filter_discovered(&self.prefix, items);
        info!(count = resources.len(), prefix = %self.prefix, "Discovered stack resources");
        Ok(resources)
    }
}

/// Narrow raw search results to the stack's live, relevant resources.
///
/// A resource is kept when its display name matches one of the stack naming
/// conventions, its lifecycle state counts as live, and its type is not an
/// ephemeral attachment object.
pub fn filter_discovered(
    prefix: &StackPrefix,
    items: Vec<TaggedResource>,
) -> Vec<TaggedResource> {
    items
        .into_iter()
        .filter(|r| {
            prefix.matches(&r.display_name)
                && is_live_state(&r.lifecycle_state)
                && !EXCLUDED_RESOURCE_TYPES.contains(&r.resource_type.as_str())
        })
        .collect()
}
