//! Stack teardown orchestration
//!
//! [`StackSweeper`] drives the dependency-ordered sweep over one stack's
//! discovered resources. The autoscaling feature resources go first as a
//! fixed prologue (they reference, but are never referenced by, the rest of
//! the stack); everything else follows the order derived by
//! [`DeletionPlan`].
//!
//! Every per-resource operation is isolated: its outcome is recorded in the
//! [`SweepReport`] and logged, and neither a failed resource nor a failed
//! step stops the sweep. Only discovery failures abort a run.

use crate::api::{
    error_is_not_found, error_is_subnet_association, ArtifactsOps, BlockStorageOps, ComputeOps,
    EventsOps, FileStorageOps, FunctionsOps, IdentityOps, LoadBalancerOps, LoggingOps,
    MonitoringOps, NetworkOps, NotificationsOps, TaggedResource,
};
use anyhow::{Context, Result};
use stacksweep_common::naming::{is_provider_default, DEFAULT_ROUTE_TABLE_MARKER};
use stacksweep_common::{DeleteOutcome, DeletionPlan, ResourceKind, StackPrefix, SweepReport};
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// One authenticated client per resource family
pub struct Services<C, B, N, L, I, G, S, M, A, T, F, E> {
    pub compute: C,
    pub block_storage: B,
    pub network: N,
    pub load_balancer: L,
    pub identity: I,
    pub logging: G,
    pub file_storage: S,
    pub monitoring: M,
    pub artifacts: A,
    pub notifications: T,
    pub functions: F,
    pub events: E,
}

/// The live client bundle used by the CLI
pub type LiveServices = Services<
    crate::api::ComputeClient,
    crate::api::BlockStorageClient,
    crate::api::NetworkClient,
    crate::api::LoadBalancerClient,
    crate::api::IdentityClient,
    crate::api::LoggingClient,
    crate::api::FileStorageClient,
    crate::api::MonitoringClient,
    crate::api::ArtifactsClient,
    crate::api::NotificationsClient,
    crate::api::FunctionsClient,
    crate::api::EventsClient,
>;

impl LiveServices {
    /// Create every service client from one shared session.
    pub fn new(session: &crate::api::Session) -> Self {
        Self {
            compute: crate::api::ComputeClient::new(session),
            block_storage: crate::api::BlockStorageClient::new(session),
            network: crate::api::NetworkClient::new(session),
            load_balancer: crate::api::LoadBalancerClient::new(session),
            identity: crate::api::IdentityClient::new(session),
            logging: crate::api::LoggingClient::new(session),
            file_storage: crate::api::FileStorageClient::new(session),
            monitoring: crate::api::MonitoringClient::new(session),
            artifacts: crate::api::ArtifactsClient::new(session),
            notifications: crate::api::NotificationsClient::new(session),
            functions: crate::api::FunctionsClient::new(session),
            events: crate::api::EventsClient::new(session),
        }
    }
}

/// Filter discovered resources down to one kind, preserving order
fn of_kind(
    resources: &[TaggedResource],
    kind: ResourceKind,
) -> impl Iterator<Item = &TaggedResource> {
    resources.iter().filter(move |r| r.kind() == Some(kind))
}

/// Deletes one stack's resources in dependency order
pub struct StackSweeper<C, B, N, L, I, G, S, M, A, T, F, E> {
    services: Services<C, B, N, L, I, G, S, M, A, T, F, E>,
    prefix: StackPrefix,
}

impl<C, B, N, L, I, G, S, M, A, T, F, E> StackSweeper<C, B, N, L, I, G, S, M, A, T, F, E>
where
    C: ComputeOps,
    B: BlockStorageOps,
    N: NetworkOps,
    L: LoadBalancerOps,
    I: IdentityOps,
    G: LoggingOps,
    S: FileStorageOps,
    M: MonitoringOps,
    A: ArtifactsOps,
    T: NotificationsOps,
    F: FunctionsOps,
    E: EventsOps,
{
    pub fn new(services: Services<C, B, N, L, I, G, S, M, A, T, F, E>, prefix: StackPrefix) -> Self {
        Self { services, prefix }
    }

    /// Run the full teardown sweep over the discovered resources.
    ///
    /// Never fails: every outcome, including errors, lands in the report.
    pub async fn run(&self, resources: &[TaggedResource]) -> SweepReport {
        info!(prefix = %self.prefix, count = resources.len(), "Deleting the stack's resources");
        let mut report = SweepReport::default();

        self.delete_autoscaling_resources(resources, &mut report)
            .await;

        for kind in DeletionPlan::ordered() {
            self.delete_kind(kind, resources, &mut report).await;
        }

        report
    }

    /// Delete only the auto-provisioned autoscaling resources (functions,
    /// event rules, autoscaling logs), ahead of an infrastructure-as-code
    /// destroy of the rest of the stack.
    pub async fn pre_destroy(&self, resources: &[TaggedResource]) -> SweepReport {
        let mut report = SweepReport::default();
        self.pre_destroy_inner(resources, &mut report).await;
        report
    }

    /// Delete the dynamic groups whose name embeds the stack prefix.
    ///
    /// Tenancy-scoped and not part of the discovery set, so it runs as its
    /// own step after the main sweep. A listing failure is fatal, the
    /// per-group deletes are isolated as usual.
    pub async fn delete_dynamic_groups(&self, tenancy_id: &str) -> Result<SweepReport> {
        let mut report = SweepReport::default();
        let groups = self
            .services
            .identity
            .list_dynamic_groups(tenancy_id)
            .await
            .context("Failed to list dynamic groups")?;

        for group in groups
            .iter()
            .filter(|g| g.name.contains(self.prefix.as_str()))
        {
            info!(name = %group.name, id = %group.id, "Deleting dynamic group");
            let result = self.services.identity.delete_dynamic_group(&group.id).await;
            record_result(
                &mut report,
                ResourceKind::DynamicGroup,
                &group.name,
                &group.id,
                result,
            );
        }

        Ok(report)
    }

    // ── Sweep steps ────────────────────────────────────────────────────────

    async fn delete_kind(
        &self,
        kind: ResourceKind,
        resources: &[TaggedResource],
        report: &mut SweepReport,
    ) {
        use ResourceKind::*;
        match kind {
            Policy => self.delete_policies(resources, report).await,
            Instance => self.delete_instances(resources, report).await,
            Volume => self.delete_volumes(resources, report).await,
            LoadBalancer => self.delete_load_balancers(resources, report).await,
            Subnet => self.delete_subnets(resources, report).await,
            SecurityList => self.delete_security_lists(resources, report).await,
            RouteTable => self.delete_route_tables(resources, report).await,
            DhcpOptions => self.delete_dhcp_options(resources, report).await,
            InternetGateway | ServiceGateway | LocalPeeringGateway | NatGateway => {
                self.delete_gateways(kind, resources, report).await
            }
            Vcn => self.delete_vcns(resources, report).await,
            UnifiedAgentConfiguration => {
                self.delete_unified_agent_configurations(resources, report)
                    .await
            }
            LogGroup => self.delete_log_groups(resources, report).await,
            MountTarget => self.delete_mount_targets(resources, report).await,
            FileSystem => self.delete_file_systems(resources, report).await,
            TagNamespace => self.delete_tag_namespaces(resources, report).await,
            BootVolume => self.delete_boot_volumes(resources, report).await,
            // Autoscaling kinds are swept by the prologue; sub-resource kinds
            // are deleted inside their parent's step.
            _ => {}
        }
    }

    /// Fixed prologue over the autoscaling feature resources
    async fn delete_autoscaling_resources(
        &self,
        resources: &[TaggedResource],
        report: &mut SweepReport,
    ) {
        self.pre_destroy_inner(resources, report).await;

        for r in of_kind(resources, ResourceKind::ContainerRepo) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting container repository");
            let result = self
                .services
                .artifacts
                .delete_container_repository(&r.identifier)
                .await;
            record_result(report, ResourceKind::ContainerRepo, &r.display_name, &r.identifier, result);
        }

        for r in of_kind(resources, ResourceKind::Alarm) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting alarm");
            let result = self.services.monitoring.delete_alarm(&r.identifier).await;
            record_result(report, ResourceKind::Alarm, &r.display_name, &r.identifier, result);
        }

        for r in of_kind(resources, ResourceKind::OnsTopic) {
            // Topic deletion is asynchronous provider-side; not waited on.
            info!(name = %r.display_name, id = %r.identifier, "Deleting notification topic");
            let result = self.services.notifications.delete_topic(&r.identifier).await;
            record_result(report, ResourceKind::OnsTopic, &r.display_name, &r.identifier, result);
        }

        for r in of_kind(resources, ResourceKind::FunctionsApplication) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting functions application");
            let result = self
                .services
                .functions
                .delete_application(&r.identifier)
                .await;
            record_result(
                report,
                ResourceKind::FunctionsApplication,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }

    /// The pre-destroy subset: functions, event rules, autoscaling logs
    async fn pre_destroy_inner(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        info!(prefix = %self.prefix, "Deleting auto-provisioned autoscaling resources");

        for app in of_kind(resources, ResourceKind::FunctionsApplication) {
            match self.services.functions.list_functions(&app.identifier).await {
                Ok(functions) => {
                    for function in functions {
                        info!(name = %function.display_name, id = %function.id, "Deleting function");
                        let result = self.services.functions.delete_function(&function.id).await;
                        record_result(
                            report,
                            ResourceKind::Function,
                            &function.display_name,
                            &function.id,
                            result,
                        );
                    }
                }
                Err(e) => {
                    warn!(
                        application = %app.display_name,
                        id = %app.identifier,
                        error = ?e,
                        "Failed to list functions"
                    );
                    report.record(
                        ResourceKind::Function,
                        &app.display_name,
                        &app.identifier,
                        DeleteOutcome::Failed,
                        Some(format!("{e:#}")),
                    );
                }
            }
        }

        for r in of_kind(resources, ResourceKind::EventRule) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting event rule");
            let result = self.services.events.delete_rule(&r.identifier).await;
            record_result(report, ResourceKind::EventRule, &r.display_name, &r.identifier, result);
        }

        let invoke_log = self.prefix.event_rule_invoke_log();
        let autoscaling_log = self.prefix.autoscaling_log();
        self.delete_logs(resources, Some(&invoke_log), report).await;
        self.delete_logs(resources, Some(&autoscaling_log), report)
            .await;
    }

    async fn delete_policies(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::Policy) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting policy");
            let result = self.services.identity.delete_policy(&r.identifier).await;
            record_result(report, ResourceKind::Policy, &r.display_name, &r.identifier, result);
        }
    }

    async fn delete_instances(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::Instance) {
            info!(name = %r.display_name, id = %r.identifier, "Terminating instance");
            let result = self.services.compute.terminate_instance(&r.identifier).await;
            record_result(report, ResourceKind::Instance, &r.display_name, &r.identifier, result);
        }
    }

    async fn delete_volumes(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::Volume) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting block volume");
            let result = self.services.block_storage.delete_volume(&r.identifier).await;
            record_result(report, ResourceKind::Volume, &r.display_name, &r.identifier, result);
        }
    }

    async fn delete_load_balancers(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::LoadBalancer) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting load balancer");
            let result = self
                .services
                .load_balancer
                .delete_load_balancer(&r.identifier)
                .await;
            record_result(
                report,
                ResourceKind::LoadBalancer,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }

    async fn delete_subnets(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::Subnet) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting subnet");
            let result = self.services.network.delete_subnet(&r.identifier).await;
            record_result(report, ResourceKind::Subnet, &r.display_name, &r.identifier, result);
        }
    }

    async fn delete_security_lists(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::SecurityList) {
            // Default security lists cannot be deleted; they go with the VCN.
            if is_provider_default(&r.display_name) {
                debug!(name = %r.display_name, "Skipping default security list");
                report.record(
                    ResourceKind::SecurityList,
                    &r.display_name,
                    &r.identifier,
                    DeleteOutcome::Skipped,
                    None,
                );
                continue;
            }
            info!(name = %r.display_name, id = %r.identifier, "Deleting security list");
            let result = self
                .services
                .network
                .delete_security_list(&r.identifier)
                .await;
            record_result(
                report,
                ResourceKind::SecurityList,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }

    async fn delete_route_tables(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::RouteTable) {
            // Strip the rules first, defaults included: gateways referenced
            // by leftover rules could not be deleted otherwise.
            if let Err(e) = self.services.network.clear_route_rules(&r.identifier).await {
                warn!(
                    name = %r.display_name,
                    id = %r.identifier,
                    error = ?e,
                    "Failed to clear route rules"
                );
                report.record(
                    ResourceKind::RouteTable,
                    &r.display_name,
                    &r.identifier,
                    DeleteOutcome::Failed,
                    Some(format!("{e:#}")),
                );
                continue;
            }

            // The VCN's default route table cannot be deleted.
            if is_provider_default(&r.display_name) {
                debug!(name = %r.display_name, "Skipping default route table");
                report.record(
                    ResourceKind::RouteTable,
                    &r.display_name,
                    &r.identifier,
                    DeleteOutcome::Skipped,
                    None,
                );
                continue;
            }

            info!(name = %r.display_name, id = %r.identifier, "Deleting route table");
            let result = match self.services.network.delete_route_table(&r.identifier).await {
                Err(e) if error_is_subnet_association(&e) => {
                    info!(
                        name = %r.display_name,
                        "Route table still associated with a subnet, re-pointing and retrying"
                    );
                    // One retry after re-pointing the subnets; a second
                    // association failure is recorded, not retried again.
                    match self.reassign_associated_subnets(&r.identifier).await {
                        Ok(()) => self.services.network.delete_route_table(&r.identifier).await,
                        Err(e) => Err(e),
                    }
                }
                other => other,
            };
            record_result(
                report,
                ResourceKind::RouteTable,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }

    /// Re-point every subnet still using `route_table_id` at the VCN's
    /// default route table, so the table can be deleted.
    async fn reassign_associated_subnets(&self, route_table_id: &str) -> Result<()> {
        let table = self.services.network.get_route_table(route_table_id).await?;
        let tables = self
            .services
            .network
            .list_route_tables(&table.compartment_id, &table.vcn_id)
            .await?;
        let default_table = tables
            .iter()
            .find(|t| t.display_name.starts_with(DEFAULT_ROUTE_TABLE_MARKER))
            .context("No default route table found in the VCN")?;

        let subnets = self
            .services
            .network
            .list_subnets(&table.compartment_id, &table.vcn_id)
            .await?;
        for subnet in subnets.iter().filter(|s| s.route_table_id == route_table_id) {
            self.services
                .network
                .reassign_subnet_route_table(&subnet.id, &default_table.id)
                .await?;
            info!(
                subnet = %subnet.display_name,
                "Re-pointed subnet at the VCN's default route table"
            );
        }
        Ok(())
    }

    async fn delete_dhcp_options(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::DhcpOptions) {
            // Same rule as security lists: defaults go with the VCN.
            if is_provider_default(&r.display_name) {
                debug!(name = %r.display_name, "Skipping default DHCP options");
                report.record(
                    ResourceKind::DhcpOptions,
                    &r.display_name,
                    &r.identifier,
                    DeleteOutcome::Skipped,
                    None,
                );
                continue;
            }
            info!(name = %r.display_name, id = %r.identifier, "Deleting DHCP options");
            let result = self.services.network.delete_dhcp_options(&r.identifier).await;
            record_result(
                report,
                ResourceKind::DhcpOptions,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }

    async fn delete_gateways(
        &self,
        kind: ResourceKind,
        resources: &[TaggedResource],
        report: &mut SweepReport,
    ) {
        for r in of_kind(resources, kind) {
            info!(name = %r.display_name, id = %r.identifier, kind = %kind, "Deleting gateway");
            let result = match kind {
                ResourceKind::InternetGateway => {
                    self.services.network.delete_internet_gateway(&r.identifier).await
                }
                ResourceKind::ServiceGateway => {
                    self.services.network.delete_service_gateway(&r.identifier).await
                }
                ResourceKind::LocalPeeringGateway => {
                    self.services
                        .network
                        .delete_local_peering_gateway(&r.identifier)
                        .await
                }
                ResourceKind::NatGateway => {
                    self.services.network.delete_nat_gateway(&r.identifier).await
                }
                _ => continue,
            };
            record_result(report, kind, &r.display_name, &r.identifier, result);
        }
    }

    async fn delete_vcns(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::Vcn) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting VCN");
            let result = self.services.network.delete_vcn(&r.identifier).await;
            record_result(report, ResourceKind::Vcn, &r.display_name, &r.identifier, result);
        }
    }

    async fn delete_unified_agent_configurations(
        &self,
        resources: &[TaggedResource],
        report: &mut SweepReport,
    ) {
        for r in of_kind(resources, ResourceKind::UnifiedAgentConfiguration) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting unified agent configuration");
            let result = self
                .services
                .logging
                .delete_unified_agent_configuration(&r.identifier)
                .await;
            record_result(
                report,
                ResourceKind::UnifiedAgentConfiguration,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }

    /// Delete logs inside the stack's log groups, then the groups themselves
    async fn delete_log_groups(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        self.delete_logs(resources, None, report).await;

        for r in of_kind(resources, ResourceKind::LogGroup) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting log group");
            let result = self.services.logging.delete_log_group(&r.identifier).await;
            record_result(report, ResourceKind::LogGroup, &r.display_name, &r.identifier, result);
        }
    }

    /// Delete logs inside every discovered log group.
    ///
    /// With `name` set, only logs whose display name matches exactly are
    /// deleted (used for the autoscaling logs during pre-destroy).
    async fn delete_logs(
        &self,
        resources: &[TaggedResource],
        name: Option<&str>,
        report: &mut SweepReport,
    ) {
        for group in of_kind(resources, ResourceKind::LogGroup) {
            let logs = match self.services.logging.list_logs(&group.identifier).await {
                Ok(logs) => logs,
                Err(e) => {
                    warn!(
                        log_group = %group.display_name,
                        id = %group.identifier,
                        error = ?e,
                        "Failed to list logs"
                    );
                    report.record(
                        ResourceKind::Log,
                        &group.display_name,
                        &group.identifier,
                        DeleteOutcome::Failed,
                        Some(format!("{e:#}")),
                    );
                    continue;
                }
            };

            for log in logs
                .into_iter()
                .filter(|l| name.map_or(true, |n| l.display_name == n))
            {
                info!(name = %log.display_name, id = %log.id, "Deleting log");
                let result = self
                    .services
                    .logging
                    .delete_log(&group.identifier, &log.id)
                    .await;
                record_result(report, ResourceKind::Log, &log.display_name, &log.id, result);
            }
        }
    }

    async fn delete_mount_targets(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::MountTarget) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting mount target");
            let result = self
                .services
                .file_storage
                .delete_mount_target(&r.identifier)
                .await;
            record_result(
                report,
                ResourceKind::MountTarget,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }

    async fn delete_file_systems(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::FileSystem) {
            // Exports first; their failures never block the file system attempt.
            match self.services.file_storage.list_exports(&r.identifier).await {
                Ok(exports) => {
                    for export in exports {
                        info!(id = %export.id, "Deleting export");
                        let result = self.services.file_storage.delete_export(&export.id).await;
                        record_result(report, ResourceKind::Export, "", &export.id, result);
                    }
                }
                Err(e) => {
                    warn!(
                        file_system = %r.display_name,
                        id = %r.identifier,
                        error = ?e,
                        "Failed to list exports"
                    );
                    report.record(
                        ResourceKind::Export,
                        &r.display_name,
                        &r.identifier,
                        DeleteOutcome::Failed,
                        Some(format!("{e:#}")),
                    );
                }
            }

            info!(name = %r.display_name, id = %r.identifier, "Deleting file system");
            let result = self
                .services
                .file_storage
                .delete_file_system(&r.identifier)
                .await;
            record_result(
                report,
                ResourceKind::FileSystem,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }

    async fn delete_tag_namespaces(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::TagNamespace) {
            info!(name = %r.display_name, id = %r.identifier, "Deleting tag namespace");
            let result = self.retire_and_cascade_delete(&r.identifier).await;
            record_result(
                report,
                ResourceKind::TagNamespace,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }

    /// Retire a namespace if still active, then request its cascading delete.
    ///
    /// The cascading delete is fire-and-forget; the provider completes it
    /// asynchronously and the sweep does not wait for it.
    async fn retire_and_cascade_delete(&self, namespace_id: &str) -> Result<()> {
        let namespace = self.services.identity.get_tag_namespace(namespace_id).await?;
        if !namespace.is_retired {
            info!(name = %namespace.name, "Retiring tag namespace");
            self.services.identity.retire_tag_namespace(namespace_id).await?;
        }
        self.services
            .identity
            .cascade_delete_tag_namespace(namespace_id)
            .await?;
        info!(
            name = %namespace.name,
            "Cascading delete requested, completion is asynchronous provider-side"
        );
        Ok(())
    }

    async fn delete_boot_volumes(&self, resources: &[TaggedResource], report: &mut SweepReport) {
        for r in of_kind(resources, ResourceKind::BootVolume) {
            // Attached boot volumes vanish with their instance; only
            // detached ones are deleted here.
            if r.lifecycle_state != "AVAILABLE" {
                debug!(name = %r.display_name, state = %r.lifecycle_state, "Skipping attached boot volume");
                report.record(
                    ResourceKind::BootVolume,
                    &r.display_name,
                    &r.identifier,
                    DeleteOutcome::Skipped,
                    None,
                );
                continue;
            }
            info!(name = %r.display_name, id = %r.identifier, "Deleting boot volume");
            let result = self
                .services
                .block_storage
                .delete_boot_volume(&r.identifier)
                .await;
            record_result(
                report,
                ResourceKind::BootVolume,
                &r.display_name,
                &r.identifier,
                result,
            );
        }
    }
}

/// Record one delete attempt: log the outcome and append it to the report.
///
/// "Not found" is its own outcome so a re-run over a half-deleted stack
/// stays quiet about resources that are already gone.
fn record_result(
    report: &mut SweepReport,
    kind: ResourceKind,
    display_name: &str,
    identifier: &str,
    result: Result<()>,
) {
    match result {
        Ok(()) => {
            info!(kind = %kind, name = %display_name, id = %identifier, "Deleted");
            report.record(kind, display_name, identifier, DeleteOutcome::Deleted, None);
        }
        Err(e) if error_is_not_found(&e) => {
            info!(kind = %kind, name = %display_name, id = %identifier, "Already gone");
            report.record(kind, display_name, identifier, DeleteOutcome::AlreadyGone, None);
        }
        Err(e) => {
            warn!(
                kind = %kind,
                name = %display_name,
                id = %identifier,
                error = ?e,
                "Failed to delete"
            );
            report.record(
                kind,
                display_name,
                identifier,
                DeleteOutcome::Failed,
                Some(format!("{e:#}")),
            );
        }
    }
}
