//! Orchestrator tests against mocked service clients
//!
//! Cover the sweep's ordering, skip rules, failure isolation, the
//! route-table remediation, and the tag-namespace retire flow without a
//! live tenancy.

use super::*;
use crate::api::artifacts::MockArtifactsOps;
use crate::api::block_storage::MockBlockStorageOps;
use crate::api::compute::MockComputeOps;
use crate::api::error::classify_response;
use crate::api::events::MockEventsOps;
use crate::api::file_storage::{ExportInfo, MockFileStorageOps};
use crate::api::functions::{FunctionInfo, MockFunctionsOps};
use crate::api::identity::{DynamicGroupInfo, MockIdentityOps, TagNamespaceInfo};
use crate::api::load_balancer::MockLoadBalancerOps;
use crate::api::logging::{LogInfo, MockLoggingOps};
use crate::api::monitoring::MockMonitoringOps;
use crate::api::network::{MockNetworkOps, RouteTableInfo, SubnetInfo};
use crate::api::notifications::MockNotificationsOps;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type TestServices = Services<
    MockComputeOps,
    MockBlockStorageOps,
    MockNetworkOps,
    MockLoadBalancerOps,
    MockIdentityOps,
    MockLoggingOps,
    MockFileStorageOps,
    MockMonitoringOps,
    MockArtifactsOps,
    MockNotificationsOps,
    MockFunctionsOps,
    MockEventsOps,
>;

type TestSweeper = StackSweeper<
    MockComputeOps,
    MockBlockStorageOps,
    MockNetworkOps,
    MockLoadBalancerOps,
    MockIdentityOps,
    MockLoggingOps,
    MockFileStorageOps,
    MockMonitoringOps,
    MockArtifactsOps,
    MockNotificationsOps,
    MockFunctionsOps,
    MockEventsOps,
>;

/// Services where nothing is expected to be called
fn empty_services() -> TestServices {
    Services {
        compute: MockComputeOps::new(),
        block_storage: MockBlockStorageOps::new(),
        network: MockNetworkOps::new(),
        load_balancer: MockLoadBalancerOps::new(),
        identity: MockIdentityOps::new(),
        logging: MockLoggingOps::new(),
        file_storage: MockFileStorageOps::new(),
        monitoring: MockMonitoringOps::new(),
        artifacts: MockArtifactsOps::new(),
        notifications: MockNotificationsOps::new(),
        functions: MockFunctionsOps::new(),
        events: MockEventsOps::new(),
    }
}

fn sweeper(services: TestServices) -> TestSweeper {
    StackSweeper::new(services, StackPrefix::new("mystack"))
}

fn res(name: &str, resource_type: &str, state: &str) -> TaggedResource {
    TaggedResource {
        display_name: name.to_string(),
        resource_type: resource_type.to_string(),
        identifier: format!("ocid-{name}"),
        lifecycle_state: state.to_string(),
        time_created: None,
    }
}

/// The conflict the provider raises for a still-associated route table
fn association_error() -> anyhow::Error {
    classify_response(
        409,
        Some("Conflict"),
        Some("Route Table ocid-rt is associated with Subnet ocid-subnet"),
    )
    .into()
}

fn not_found_error() -> anyhow::Error {
    classify_response(404, Some("NotAuthorizedOrNotFound"), Some("resource gone")).into()
}

/// Shared call log for cross-mock ordering assertions
fn call_log() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Clone) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let push = {
        let calls = calls.clone();
        move |entry: &str| calls.lock().unwrap().push(entry.to_string())
    };
    (calls, push)
}

fn position(calls: &[String], entry: &str) -> usize {
    calls
        .iter()
        .position(|c| c == entry)
        .unwrap_or_else(|| panic!("{entry} missing from call log {calls:?}"))
}

#[tokio::test]
async fn full_stack_teardown_runs_in_dependency_order() {
    // One instance, its volume, a VCN with one non-default subnet and the
    // default route table. Expected: instance, volume, subnet, VCN deleted
    // in that order; the default route table only has its rules stripped.
    let resources = vec![
        res("mystack-vcn", "Vcn", "AVAILABLE"),
        res("mystack-volume", "Volume", "AVAILABLE"),
        res("mystack-subnet", "Subnet", "AVAILABLE"),
        res("Default Route Table for mystack-vcn", "RouteTable", "AVAILABLE"),
        res("mystack-node", "Instance", "RUNNING"),
    ];

    let (calls, push) = call_log();
    let mut services = empty_services();

    let p = push.clone();
    services
        .compute
        .expect_terminate_instance()
        .times(1)
        .returning(move |_| {
            p("instance");
            Ok(())
        });
    let p = push.clone();
    services
        .block_storage
        .expect_delete_volume()
        .times(1)
        .returning(move |_| {
            p("volume");
            Ok(())
        });
    let p = push.clone();
    services
        .network
        .expect_delete_subnet()
        .times(1)
        .returning(move |_| {
            p("subnet");
            Ok(())
        });
    let p = push.clone();
    services
        .network
        .expect_clear_route_rules()
        .times(1)
        .returning(move |_| {
            p("clear-rules");
            Ok(())
        });
    services.network.expect_delete_route_table().times(0);
    let p = push.clone();
    services
        .network
        .expect_delete_vcn()
        .times(1)
        .returning(move |_| {
            p("vcn");
            Ok(())
        });

    let report = sweeper(services).run(&resources).await;

    let calls = calls.lock().unwrap();
    assert!(position(&calls, "instance") < position(&calls, "volume"));
    assert!(position(&calls, "volume") < position(&calls, "subnet"));
    assert!(position(&calls, "subnet") < position(&calls, "vcn"));
    assert!(position(&calls, "clear-rules") < position(&calls, "vcn"));

    assert_eq!(report.deleted(), 4);
    assert_eq!(report.skipped(), 1, "default route table must be skipped");
    assert_eq!(report.failed(), 0);
}

#[tokio::test]
async fn associated_route_table_is_repointed_and_retried_once() {
    let resources = vec![res("mystack-db-rt", "RouteTable", "AVAILABLE")];

    let mut services = empty_services();
    services
        .network
        .expect_clear_route_rules()
        .times(1)
        .returning(|_| Ok(()));

    // First delete hits the association conflict, the retry succeeds.
    let attempts = AtomicUsize::new(0);
    services
        .network
        .expect_delete_route_table()
        .times(2)
        .returning(move |_| {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(association_error())
            } else {
                Ok(())
            }
        });

    services
        .network
        .expect_get_route_table()
        .times(1)
        .returning(|id| {
            Ok(RouteTableInfo {
                id: id.to_string(),
                display_name: "mystack-db-rt".to_string(),
                vcn_id: "ocid-vcn".to_string(),
                compartment_id: "ocid-comp".to_string(),
            })
        });
    services
        .network
        .expect_list_route_tables()
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                RouteTableInfo {
                    id: "ocid-default-rt".to_string(),
                    display_name: "Default Route Table for mystack-vcn".to_string(),
                    vcn_id: "ocid-vcn".to_string(),
                    compartment_id: "ocid-comp".to_string(),
                },
                RouteTableInfo {
                    id: "ocid-mystack-db-rt".to_string(),
                    display_name: "mystack-db-rt".to_string(),
                    vcn_id: "ocid-vcn".to_string(),
                    compartment_id: "ocid-comp".to_string(),
                },
            ])
        });
    services.network.expect_list_subnets().times(1).returning(|_, _| {
        Ok(vec![
            SubnetInfo {
                id: "ocid-db-subnet".to_string(),
                display_name: "mystack-db-subnet".to_string(),
                route_table_id: "ocid-mystack-db-rt".to_string(),
            },
            SubnetInfo {
                id: "ocid-web-subnet".to_string(),
                display_name: "mystack-web-subnet".to_string(),
                route_table_id: "ocid-default-rt".to_string(),
            },
        ])
    });
    // Only the subnet pointing at the doomed table is re-pointed.
    services
        .network
        .expect_reassign_subnet_route_table()
        .times(1)
        .withf(|subnet_id: &str, rt_id: &str| {
            subnet_id == "ocid-db-subnet" && rt_id == "ocid-default-rt"
        })
        .returning(|_, _| Ok(()));

    let report = sweeper(services).run(&resources).await;

    assert_eq!(report.deleted(), 1);
    assert_eq!(report.failed(), 0);
}

#[tokio::test]
async fn second_association_failure_is_recorded_not_retried() {
    let resources = vec![res("mystack-db-rt", "RouteTable", "AVAILABLE")];

    let mut services = empty_services();
    services
        .network
        .expect_clear_route_rules()
        .returning(|_| Ok(()));
    // Exactly two attempts, never a third.
    services
        .network
        .expect_delete_route_table()
        .times(2)
        .returning(|_| Err(association_error()));
    services.network.expect_get_route_table().returning(|id| {
        Ok(RouteTableInfo {
            id: id.to_string(),
            display_name: "mystack-db-rt".to_string(),
            vcn_id: "ocid-vcn".to_string(),
            compartment_id: "ocid-comp".to_string(),
        })
    });
    services.network.expect_list_route_tables().returning(|_, _| {
        Ok(vec![RouteTableInfo {
            id: "ocid-default-rt".to_string(),
            display_name: "Default Route Table for mystack-vcn".to_string(),
            vcn_id: "ocid-vcn".to_string(),
            compartment_id: "ocid-comp".to_string(),
        }])
    });
    services
        .network
        .expect_list_subnets()
        .returning(|_, _| Ok(vec![]));

    let report = sweeper(services).run(&resources).await;

    assert_eq!(report.failed(), 1);
    assert_eq!(report.deleted(), 0);
    let failure = &report.failures()[0];
    assert_eq!(failure.kind, ResourceKind::RouteTable);
    assert!(failure.error.as_deref().unwrap().contains("associated with Subnet"));
}

#[tokio::test]
async fn one_failure_stops_neither_the_kind_loop_nor_later_steps() {
    let resources = vec![
        res("mystack-node-0", "Instance", "RUNNING"),
        res("mystack-node-1", "Instance", "RUNNING"),
        res("mystack-subnet", "Subnet", "AVAILABLE"),
    ];

    let mut services = empty_services();
    services
        .compute
        .expect_terminate_instance()
        .times(2)
        .returning(|id| {
            if id == "ocid-mystack-node-0" {
                Err(anyhow::anyhow!("internal provider error"))
            } else {
                Ok(())
            }
        });
    services
        .network
        .expect_delete_subnet()
        .times(1)
        .returning(|_| Ok(()));

    let report = sweeper(services).run(&resources).await;

    assert_eq!(report.records_of(ResourceKind::Instance).len(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.deleted(), 2);
}

#[tokio::test]
async fn default_named_artifacts_are_never_passed_to_delete() {
    let resources = vec![
        res("Default Security List for mystack-vcn", "SecurityList", "AVAILABLE"),
        res("Default Route Table for mystack-vcn", "RouteTable", "AVAILABLE"),
        res("Default DHCP Options for mystack-vcn", "DHCPOptions", "AVAILABLE"),
    ];

    let mut services = empty_services();
    services.network.expect_delete_security_list().times(0);
    services.network.expect_delete_route_table().times(0);
    services.network.expect_delete_dhcp_options().times(0);
    // Rule stripping still happens on the default route table.
    services
        .network
        .expect_clear_route_rules()
        .times(1)
        .returning(|_| Ok(()));

    let report = sweeper(services).run(&resources).await;

    assert_eq!(report.skipped(), 3);
    assert_eq!(report.deleted(), 0);
}

#[tokio::test]
async fn retired_namespace_is_not_retired_again() {
    let resources = vec![res("wlsoci-mystack-tags", "TagNamespace", "INACTIVE")];

    let mut services = empty_services();
    services.identity.expect_get_tag_namespace().times(1).returning(|id| {
        Ok(TagNamespaceInfo {
            id: id.to_string(),
            name: "wlsoci-mystack-tags".to_string(),
            is_retired: true,
        })
    });
    services.identity.expect_retire_tag_namespace().times(0);
    services
        .identity
        .expect_cascade_delete_tag_namespace()
        .times(1)
        .returning(|_| Ok(()));

    let report = sweeper(services).run(&resources).await;
    assert_eq!(report.deleted(), 1);
}

#[tokio::test]
async fn active_namespace_is_retired_before_cascade_delete() {
    let resources = vec![res("wlsoci-mystack-tags", "TagNamespace", "ACTIVE")];

    let (calls, push) = call_log();
    let mut services = empty_services();
    services.identity.expect_get_tag_namespace().times(1).returning(|id| {
        Ok(TagNamespaceInfo {
            id: id.to_string(),
            name: "wlsoci-mystack-tags".to_string(),
            is_retired: false,
        })
    });
    let p = push.clone();
    services
        .identity
        .expect_retire_tag_namespace()
        .times(1)
        .returning(move |_| {
            p("retire");
            Ok(())
        });
    let p = push.clone();
    services
        .identity
        .expect_cascade_delete_tag_namespace()
        .times(1)
        .returning(move |_| {
            p("cascade");
            Ok(())
        });

    let report = sweeper(services).run(&resources).await;

    let calls = calls.lock().unwrap();
    assert!(position(&calls, "retire") < position(&calls, "cascade"));
    assert_eq!(report.deleted(), 1);
}

#[tokio::test]
async fn only_detached_boot_volumes_are_deleted() {
    let resources = vec![
        res("mystack-boot-0", "BootVolume", "AVAILABLE"),
        res("mystack-boot-1", "BootVolume", "ACTIVE"),
    ];

    let mut services = empty_services();
    services
        .block_storage
        .expect_delete_boot_volume()
        .times(1)
        .withf(|id: &str| id == "ocid-mystack-boot-0")
        .returning(|_| Ok(()));

    let report = sweeper(services).run(&resources).await;

    assert_eq!(report.deleted(), 1);
    assert_eq!(report.skipped(), 1);
}

#[tokio::test]
async fn pre_destroy_touches_only_autoscaling_resources() {
    // Instances and subnets in the discovery set must stay untouched; no
    // expectations are set on their clients, so a stray call panics.
    let resources = vec![
        res("mystack-fn-app", "FunctionsApplication", "ACTIVE"),
        res("mystack-event-rule", "EventRule", "ACTIVE"),
        res("mystack-log-group", "LogGroup", "ACTIVE"),
        res("mystack-node", "Instance", "RUNNING"),
        res("mystack-subnet", "Subnet", "AVAILABLE"),
    ];

    let mut services = empty_services();
    services
        .functions
        .expect_list_functions()
        .times(1)
        .returning(|_| {
            Ok(vec![FunctionInfo {
                id: "ocid-fn-0".to_string(),
                display_name: "mystack-scale-fn".to_string(),
            }])
        });
    services
        .functions
        .expect_delete_function()
        .times(1)
        .returning(|_| Ok(()));
    // The application itself is only deleted by the full sweep.
    services.functions.expect_delete_application().times(0);
    services
        .events
        .expect_delete_rule()
        .times(1)
        .returning(|_| Ok(()));
    // Both autoscaling log names are looked up; the unrelated log stays.
    services.logging.expect_list_logs().times(2).returning(|_| {
        Ok(vec![
            LogInfo {
                id: "ocid-log-invoke".to_string(),
                display_name: "mystack_event_rule_invoke_log".to_string(),
            },
            LogInfo {
                id: "ocid-log-auto".to_string(),
                display_name: "mystack_autoscaling_log".to_string(),
            },
            LogInfo {
                id: "ocid-log-access".to_string(),
                display_name: "mystack_access_log".to_string(),
            },
        ])
    });
    services
        .logging
        .expect_delete_log()
        .times(2)
        .withf(|_, log_id: &str| log_id != "ocid-log-access")
        .returning(|_, _| Ok(()));
    services.logging.expect_delete_log_group().times(0);

    let report = sweeper(services).pre_destroy(&resources).await;

    assert_eq!(report.records_of(ResourceKind::Function).len(), 1);
    assert_eq!(report.records_of(ResourceKind::EventRule).len(), 1);
    assert_eq!(report.records_of(ResourceKind::Log).len(), 2);
    assert_eq!(report.failed(), 0);
}

#[tokio::test]
async fn autoscaling_prologue_runs_before_policies_in_spec_order() {
    let resources = vec![
        res("mystack-policy", "Policy", "ACTIVE"),
        res("mystack-fn-app", "FunctionsApplication", "ACTIVE"),
        res("mystack-repo", "ContainerRepo", "AVAILABLE"),
        res("mystack-alarm", "Alarm", "ACTIVE"),
        res("mystack-topic", "OnsTopic", "ACTIVE"),
    ];

    let (calls, push) = call_log();
    let mut services = empty_services();
    services
        .functions
        .expect_list_functions()
        .returning(|_| Ok(vec![]));
    let p = push.clone();
    services
        .artifacts
        .expect_delete_container_repository()
        .times(1)
        .returning(move |_| {
            p("repo");
            Ok(())
        });
    let p = push.clone();
    services
        .monitoring
        .expect_delete_alarm()
        .times(1)
        .returning(move |_| {
            p("alarm");
            Ok(())
        });
    let p = push.clone();
    services
        .notifications
        .expect_delete_topic()
        .times(1)
        .returning(move |_| {
            p("topic");
            Ok(())
        });
    let p = push.clone();
    services
        .functions
        .expect_delete_application()
        .times(1)
        .returning(move |_| {
            p("application");
            Ok(())
        });
    let p = push.clone();
    services
        .identity
        .expect_delete_policy()
        .times(1)
        .returning(move |_| {
            p("policy");
            Ok(())
        });

    sweeper(services).run(&resources).await;

    let calls = calls.lock().unwrap();
    assert!(position(&calls, "repo") < position(&calls, "alarm"));
    assert!(position(&calls, "alarm") < position(&calls, "topic"));
    assert!(position(&calls, "topic") < position(&calls, "application"));
    assert!(position(&calls, "application") < position(&calls, "policy"));
}

#[tokio::test]
async fn export_failure_does_not_block_file_system_delete() {
    let resources = vec![res("mystack-fss", "FileSystem", "ACTIVE")];

    let mut services = empty_services();
    services
        .file_storage
        .expect_list_exports()
        .times(1)
        .returning(|_| {
            Ok(vec![ExportInfo {
                id: "ocid-export-0".to_string(),
            }])
        });
    services
        .file_storage
        .expect_delete_export()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("export busy")));
    services
        .file_storage
        .expect_delete_file_system()
        .times(1)
        .returning(|_| Ok(()));

    let report = sweeper(services).run(&resources).await;

    assert_eq!(report.records_of(ResourceKind::Export).len(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.records_of(ResourceKind::FileSystem)[0].outcome, DeleteOutcome::Deleted);
}

#[tokio::test]
async fn dynamic_groups_are_matched_by_prefix() {
    let mut services = empty_services();
    services
        .identity
        .expect_list_dynamic_groups()
        .times(1)
        .returning(|_| {
            Ok(vec![
                DynamicGroupInfo {
                    id: "ocid-dg-0".to_string(),
                    name: "mystack-principal-group".to_string(),
                },
                DynamicGroupInfo {
                    id: "ocid-dg-1".to_string(),
                    name: "otherstack-principal-group".to_string(),
                },
            ])
        });
    services
        .identity
        .expect_delete_dynamic_group()
        .times(1)
        .withf(|id: &str| id == "ocid-dg-0")
        .returning(|_| Ok(()));

    let report = sweeper(services)
        .delete_dynamic_groups("ocid-tenancy")
        .await
        .unwrap();

    assert_eq!(report.deleted(), 1);
}

#[tokio::test]
async fn not_found_is_recorded_as_already_gone() {
    let resources = vec![res("mystack-node", "Instance", "RUNNING")];

    let mut services = empty_services();
    services
        .compute
        .expect_terminate_instance()
        .times(1)
        .returning(|_| Err(not_found_error()));

    let report = sweeper(services).run(&resources).await;

    assert_eq!(report.already_gone(), 1);
    assert_eq!(report.failed(), 0);
}
