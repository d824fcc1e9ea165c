//! Configuration for a sweep run
//!
//! All run parameters are explicit values passed into the orchestrator's
//! constructor; there is no ambient global state.

use stacksweep_common::StackPrefix;

/// Pre-destroy feature selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Feature {
    /// Auto-provisioned autoscaling resources (functions, event rules, logs)
    Autoscaling,
}

/// Configuration for one sweep run
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Normalized stack prefix identifying the target deployment
    pub prefix: StackPrefix,
    /// Target region; `None` means the session's home region
    pub region: Option<String>,
    /// Tenancy OCID, required for the dynamic-group step
    pub tenancy_id: Option<String>,
}

impl SweepConfig {
    pub fn new(service_name: &str, region: Option<String>, tenancy_id: Option<String>) -> Self {
        Self {
            prefix: StackPrefix::new(service_name),
            region,
            tenancy_id,
        }
    }
}
