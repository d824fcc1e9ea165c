//! Provider resource kinds and deletion ordering
//!
//! The teardown of a stack must respect the dependency constraints between
//! resource types: a VCN cannot go while any of its child network objects
//! exist, a subnet cannot go while an instance still has a VNIC in it, and
//! so on. Rather than hand-maintaining one long ordered list, each kind
//! declares the kinds that must be processed before it, and
//! [`DeletionPlan::ordered`] derives the sweep order from that graph. The
//! ordering contract is therefore testable independently of any particular
//! hand-written sequence.

/// Resource types handled by the sweep.
///
/// Declaration order is the canonical tie-break used when deriving the
/// deletion plan: among kinds whose dependencies are satisfied, the one
/// declared first is swept first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Event rule (invokes functions; autoscaling feature)
    EventRule,
    /// Container image repository (autoscaling feature)
    ContainerRepo,
    /// Monitoring alarm (autoscaling feature)
    Alarm,
    /// Notification topic (autoscaling feature; delete is asynchronous provider-side)
    OnsTopic,
    /// Functions application (its functions must be deleted first)
    FunctionsApplication,
    /// IAM policy
    Policy,
    /// Compute instance
    Instance,
    /// Block volume (may be attached until its instance terminates)
    Volume,
    /// Load balancer (holds addresses inside subnets)
    LoadBalancer,
    /// VCN subnet
    Subnet,
    /// Security list (referenced by subnets)
    SecurityList,
    /// Route table (referenced by subnets)
    RouteTable,
    /// DHCP option set (referenced by subnets)
    DhcpOptions,
    /// Internet gateway
    InternetGateway,
    /// Service gateway
    ServiceGateway,
    /// Local peering gateway
    LocalPeeringGateway,
    /// NAT gateway
    NatGateway,
    /// The VCN itself (last network object standing)
    Vcn,
    /// Unified agent configuration (references logs)
    UnifiedAgentConfiguration,
    /// Log group (must be emptied of logs first)
    LogGroup,
    /// File-storage mount target
    MountTarget,
    /// File system (exports deleted first)
    FileSystem,
    /// Tag namespace (retired, then cascade-deleted asynchronously)
    TagNamespace,
    /// Boot volume (only deleted when detached)
    BootVolume,
    /// Function inside an application (sub-resource, never discovered directly)
    Function,
    /// Log inside a log group (sub-resource, never discovered directly)
    Log,
    /// File-system export (sub-resource, never discovered directly)
    Export,
    /// Dynamic group (tenancy-scoped, swept separately after the main run)
    DynamicGroup,
}

impl ResourceKind {
    /// Parse a resource-type string as reported by the structured search service.
    pub fn from_search_type(s: &str) -> Option<Self> {
        use ResourceKind::*;
        Some(match s {
            "EventRule" => EventRule,
            "ContainerRepo" => ContainerRepo,
            "Alarm" => Alarm,
            "OnsTopic" => OnsTopic,
            "FunctionsApplication" => FunctionsApplication,
            "Policy" => Policy,
            "Instance" => Instance,
            "Volume" => Volume,
            "LoadBalancer" => LoadBalancer,
            "Subnet" => Subnet,
            "SecurityList" => SecurityList,
            "RouteTable" => RouteTable,
            "DHCPOptions" => DhcpOptions,
            "InternetGateway" => InternetGateway,
            "ServiceGateway" => ServiceGateway,
            "LocalPeeringGateway" => LocalPeeringGateway,
            "NatGateway" => NatGateway,
            "Vcn" => Vcn,
            "UnifiedAgentConfiguration" => UnifiedAgentConfiguration,
            "LogGroup" => LogGroup,
            "MountTarget" => MountTarget,
            "FileSystem" => FileSystem,
            "TagNamespace" => TagNamespace,
            "BootVolume" => BootVolume,
            "Function" => Function,
            "Log" => Log,
            "Export" => Export,
            "DynamicGroup" => DynamicGroup,
            _ => return None,
        })
    }

    /// The provider's resource-type string for this kind
    pub fn as_str(self) -> &'static str {
        use ResourceKind::*;
        match self {
            EventRule => "EventRule",
            ContainerRepo => "ContainerRepo",
            Alarm => "Alarm",
            OnsTopic => "OnsTopic",
            FunctionsApplication => "FunctionsApplication",
            Policy => "Policy",
            Instance => "Instance",
            Volume => "Volume",
            LoadBalancer => "LoadBalancer",
            Subnet => "Subnet",
            SecurityList => "SecurityList",
            RouteTable => "RouteTable",
            DhcpOptions => "DHCPOptions",
            InternetGateway => "InternetGateway",
            ServiceGateway => "ServiceGateway",
            LocalPeeringGateway => "LocalPeeringGateway",
            NatGateway => "NatGateway",
            Vcn => "Vcn",
            UnifiedAgentConfiguration => "UnifiedAgentConfiguration",
            LogGroup => "LogGroup",
            MountTarget => "MountTarget",
            FileSystem => "FileSystem",
            TagNamespace => "TagNamespace",
            BootVolume => "BootVolume",
            Function => "Function",
            Log => "Log",
            Export => "Export",
            DynamicGroup => "DynamicGroup",
        }
    }

    /// Kinds belonging to the autoscaling feature, swept as a fixed prologue
    /// before the plan-driven part of the run.
    pub fn is_autoscaling(self) -> bool {
        use ResourceKind::*;
        matches!(
            self,
            EventRule | ContainerRepo | Alarm | OnsTopic | FunctionsApplication
        )
    }

    /// Kinds that must be fully processed before this kind can be deleted.
    ///
    /// Only real provider-enforced constraints are encoded here; everything
    /// else is left to the canonical declaration order.
    pub fn blocked_by(self) -> &'static [ResourceKind] {
        use ResourceKind::*;
        match self {
            // A volume may still be attached until its instance terminates.
            Volume => &[Instance],
            // Instances hold VNICs in subnets; load balancers hold addresses.
            Subnet => &[Instance, LoadBalancer],
            // Subnets reference these until they are gone.
            SecurityList => &[Subnet],
            RouteTable => &[Subnet],
            DhcpOptions => &[Subnet],
            // The VCN can only go once every child network object is gone.
            Vcn => &[
                Subnet,
                SecurityList,
                RouteTable,
                DhcpOptions,
                InternetGateway,
                ServiceGateway,
                LocalPeeringGateway,
                NatGateway,
            ],
            // Agent configurations reference logs inside the group.
            LogGroup => &[UnifiedAgentConfiguration],
            // Mount targets export the file system.
            FileSystem => &[MountTarget],
            _ => &[],
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds covered by the plan-driven part of the sweep, in canonical order.
///
/// Autoscaling kinds and sub-resource kinds are excluded: the former are
/// handled by the fixed autoscaling prologue, the latter are deleted inside
/// their parent's step.
const PLANNED_KINDS: &[ResourceKind] = &[
    ResourceKind::Policy,
    ResourceKind::Instance,
    ResourceKind::Volume,
    ResourceKind::LoadBalancer,
    ResourceKind::Subnet,
    ResourceKind::SecurityList,
    ResourceKind::RouteTable,
    ResourceKind::DhcpOptions,
    ResourceKind::InternetGateway,
    ResourceKind::ServiceGateway,
    ResourceKind::LocalPeeringGateway,
    ResourceKind::NatGateway,
    ResourceKind::Vcn,
    ResourceKind::UnifiedAgentConfiguration,
    ResourceKind::LogGroup,
    ResourceKind::MountTarget,
    ResourceKind::FileSystem,
    ResourceKind::TagNamespace,
    ResourceKind::BootVolume,
];

/// Deletion order derived from the dependency graph
pub struct DeletionPlan;

impl DeletionPlan {
    /// Derive the sweep order over [`PLANNED_KINDS`].
    ///
    /// Kahn's algorithm with the canonical declaration order as tie-break:
    /// among kinds whose `blocked_by` set is fully processed, the earliest
    /// declared one goes next. The graph is static, so a cycle is a
    /// programming error.
    pub fn ordered() -> Vec<ResourceKind> {
        let mut remaining: Vec<ResourceKind> = PLANNED_KINDS.to_vec();
        let mut done: Vec<ResourceKind> = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let idx = remaining
                .iter()
                .position(|k| {
                    k.blocked_by()
                        .iter()
                        .all(|dep| done.contains(dep) || !PLANNED_KINDS.contains(dep))
                })
                .expect("deletion dependency graph contains a cycle");
            let kind = remaining.remove(idx);
            done.push(kind);
        }

        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[ResourceKind], kind: ResourceKind) -> usize {
        order
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_else(|| panic!("{kind} missing from plan"))
    }

    #[test]
    fn plan_covers_every_planned_kind_once() {
        let order = DeletionPlan::ordered();
        assert_eq!(order.len(), PLANNED_KINDS.len());
        for kind in PLANNED_KINDS {
            assert_eq!(order.iter().filter(|k| *k == kind).count(), 1);
        }
    }

    #[test]
    fn vcn_goes_after_all_network_children() {
        let order = DeletionPlan::ordered();
        let vcn = position(&order, ResourceKind::Vcn);
        for child in [
            ResourceKind::Subnet,
            ResourceKind::SecurityList,
            ResourceKind::RouteTable,
            ResourceKind::DhcpOptions,
            ResourceKind::InternetGateway,
            ResourceKind::ServiceGateway,
            ResourceKind::LocalPeeringGateway,
            ResourceKind::NatGateway,
        ] {
            assert!(
                position(&order, child) < vcn,
                "{child} must be swept before the VCN"
            );
        }
    }

    #[test]
    fn instances_go_before_volumes_and_subnets() {
        let order = DeletionPlan::ordered();
        let instance = position(&order, ResourceKind::Instance);
        assert!(instance < position(&order, ResourceKind::Volume));
        assert!(instance < position(&order, ResourceKind::Subnet));
    }

    #[test]
    fn subnets_go_before_their_referenced_objects() {
        let order = DeletionPlan::ordered();
        let subnet = position(&order, ResourceKind::Subnet);
        assert!(subnet < position(&order, ResourceKind::SecurityList));
        assert!(subnet < position(&order, ResourceKind::RouteTable));
        assert!(subnet < position(&order, ResourceKind::DhcpOptions));
    }

    #[test]
    fn mount_targets_go_before_file_systems() {
        let order = DeletionPlan::ordered();
        assert!(
            position(&order, ResourceKind::MountTarget)
                < position(&order, ResourceKind::FileSystem)
        );
    }

    #[test]
    fn agent_configurations_go_before_log_groups() {
        let order = DeletionPlan::ordered();
        assert!(
            position(&order, ResourceKind::UnifiedAgentConfiguration)
                < position(&order, ResourceKind::LogGroup)
        );
    }

    #[test]
    fn canonical_order_is_already_a_valid_topological_order() {
        // The tie-break keeps the declaration order whenever it is valid,
        // so the derived plan must match PLANNED_KINDS exactly.
        assert_eq!(DeletionPlan::ordered(), PLANNED_KINDS);
    }

    #[test]
    fn search_type_roundtrip() {
        for kind in PLANNED_KINDS {
            assert_eq!(ResourceKind::from_search_type(kind.as_str()), Some(*kind));
        }
        assert_eq!(
            ResourceKind::from_search_type("DHCPOptions"),
            Some(ResourceKind::DhcpOptions)
        );
        assert_eq!(ResourceKind::from_search_type("Vnic"), None);
    }

    #[test]
    fn autoscaling_kinds_are_not_planned() {
        for kind in DeletionPlan::ordered() {
            assert!(!kind.is_autoscaling());
        }
        assert!(ResourceKind::EventRule.is_autoscaling());
        assert!(ResourceKind::FunctionsApplication.is_autoscaling());
        assert!(!ResourceKind::Policy.is_autoscaling());
    }
}
