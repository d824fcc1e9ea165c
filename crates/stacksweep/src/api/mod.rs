//! Provider API clients
//!
//! One thin client per resource family, all sharing a single authenticated
//! [`session::Session`]. Each client exposes exactly the operations the
//! sweep needs behind an ops trait so orchestration logic can be tested
//! against mocks:
//!
//! - search: structured-search resource discovery
//! - compute / block storage / network / load balancer: infrastructure teardown
//! - identity: policies, dynamic groups, tag namespaces
//! - logging / file storage: grouped sub-resource teardown
//! - monitoring / artifacts / notifications / functions / events: autoscaling feature resources

pub mod artifacts;
pub mod block_storage;
pub mod compute;
pub mod error;
pub mod events;
pub mod file_storage;
pub mod functions;
pub mod identity;
pub mod load_balancer;
pub mod logging;
pub mod monitoring;
pub mod network;
pub mod notifications;
pub mod search;
pub mod session;

pub use error::{error_is_not_found, error_is_subnet_association, ApiError};
pub use search::{ResourceDiscovery, TaggedResource};
pub use session::Session;

pub use artifacts::{ArtifactsClient, ArtifactsOps};
pub use block_storage::{BlockStorageClient, BlockStorageOps};
pub use compute::{ComputeClient, ComputeOps};
pub use events::{EventsClient, EventsOps};
pub use file_storage::{FileStorageClient, FileStorageOps};
pub use functions::{FunctionsClient, FunctionsOps};
pub use identity::{IdentityClient, IdentityOps};
pub use load_balancer::{LoadBalancerClient, LoadBalancerOps};
pub use logging::{LoggingClient, LoggingOps};
pub use monitoring::{MonitoringClient, MonitoringOps};
pub use network::{NetworkClient, NetworkOps};
pub use notifications::{NotificationsClient, NotificationsOps};
