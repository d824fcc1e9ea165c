//! Stack prefix construction and display-name predicates
//!
//! Discovery matches resources to a stack through a handful of naming
//! conventions left behind by the provisioning layer. Each convention is a
//! named predicate here so the matching rules are unit-testable instead of
//! being inline string checks scattered through the sweep.

use crate::defaults::{MAX_SERVICE_NAME_LEN, STACK_SEPARATOR};

/// Marker prepended to the stack prefix for tag-derived resource names.
pub const TAG_DERIVED_NAME_MARKER: &str = "wlsoci-";

/// Display-name prefix of the route table the provider creates with a VCN.
pub const DEFAULT_ROUTE_TABLE_MARKER: &str = "Default Route Table for ";

/// Substring identifying provider-created default artifacts
/// ("Default Security List ...", "Default Route Table ...", "Default DHCP Options ...").
const PROVIDER_DEFAULT_MARKER: &str = "Default";

/// The normalized stack prefix identifying one deployment's resources.
///
/// Built from the raw service name by truncating to
/// [`MAX_SERVICE_NAME_LEN`] characters and appending the stack separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackPrefix {
    value: String,
}

impl StackPrefix {
    /// Normalize a raw service name into a stack prefix.
    pub fn new(service_name: &str) -> Self {
        let mut value: String = service_name.chars().take(MAX_SERVICE_NAME_LEN).collect();
        value.push(STACK_SEPARATOR);
        Self { value }
    }

    /// The prefix including the trailing separator, e.g. `mystack-`.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The service name without the trailing separator.
    pub fn service_name(&self) -> &str {
        self.value.strip_suffix(STACK_SEPARATOR).unwrap_or(&self.value)
    }

    /// Log resources replace the separator with an underscore, e.g. `mystack_`.
    pub fn log_name(&self) -> String {
        format!("{}_", self.service_name())
    }

    /// Tag-derived resource names embed `wlsoci-<prefix>`.
    pub fn tag_derived_name(&self) -> String {
        format!("{TAG_DERIVED_NAME_MARKER}{}", self.value)
    }

    /// The display name of the VCN's default route table for this stack.
    pub fn default_route_table_name(&self) -> String {
        format!("{DEFAULT_ROUTE_TABLE_MARKER}{}", self.value)
    }

    /// Name of the event-rule invocation log created for autoscaling.
    pub fn event_rule_invoke_log(&self) -> String {
        format!("{}_event_rule_invoke_log", self.service_name())
    }

    /// Name of the autoscaling log created for autoscaling.
    pub fn autoscaling_log(&self) -> String {
        format!("{}_autoscaling_log", self.service_name())
    }

    /// Whether a display name belongs to this stack.
    ///
    /// True when the name starts with the prefix, or embeds the tag-derived
    /// name, the default-route-table name, or the underscore log-name
    /// variant. These are the only four ways the provisioning layer names
    /// stack resources.
    pub fn matches(&self, display_name: &str) -> bool {
        display_name.starts_with(self.as_str())
            || display_name.contains(&self.tag_derived_name())
            || display_name.contains(&self.default_route_table_name())
            || display_name.contains(&self.log_name())
    }
}

impl std::fmt::Display for StackPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Whether a display name identifies a provider-created default artifact.
///
/// Default security lists, route tables, and DHCP option sets cannot be
/// deleted directly; they disappear with their VCN and must be skipped.
pub fn is_provider_default(display_name: &str) -> bool {
    display_name.contains(PROVIDER_DEFAULT_MARKER)
}
