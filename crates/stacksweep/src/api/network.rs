//! Virtual network teardown
//!
//! Covers every VCN child object the sweep removes: subnets, security
//! lists, route tables (including rule stripping and subnet re-association),
//! DHCP option sets, the four gateway types, and finally the VCN itself.

use crate::api::session::Session;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Route table details needed for the subnet re-association remediation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTableInfo {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub vcn_id: String,
    pub compartment_id: String,
}

/// Subnet summary with its current route table association
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetInfo {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub route_table_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSubnetDetails<'a> {
    route_table_id: &'a str,
}

/// Virtual network client
pub struct NetworkClient {
    session: Session,
    base: String,
}

impl NetworkClient {
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            base: session.core_endpoint(),
        }
    }
}

/// Virtual network operations used by the sweep, mockable in tests
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait NetworkOps: Send + Sync {
    /// Delete a subnet and wait until it reaches TERMINATED
    async fn delete_subnet(&self, subnet_id: &str) -> Result<()>;

    /// Delete a security list and wait until it reaches TERMINATED
    async fn delete_security_list(&self, security_list_id: &str) -> Result<()>;

    /// Replace a route table's rules with an empty set and wait for AVAILABLE
    async fn clear_route_rules(&self, route_table_id: &str) -> Result<()>;

    /// Delete a route table and wait until it reaches TERMINATED
    async fn delete_route_table(&self, route_table_id: &str) -> Result<()>;

    /// Fetch a route table's VCN and compartment
    async fn get_route_table(&self, route_table_id: &str) -> Result<RouteTableInfo>;

    /// List all route tables of a VCN
    async fn list_route_tables(
        &self,
        compartment_id: &str,
        vcn_id: &str,
    ) -> Result<Vec<RouteTableInfo>>;

    /// List all subnets of a VCN
    async fn list_subnets(&self, compartment_id: &str, vcn_id: &str) -> Result<Vec<SubnetInfo>>;

    /// Point a subnet at a different route table and wait for AVAILABLE
    async fn reassign_subnet_route_table(
        &self,
        subnet_id: &str,
        route_table_id: &str,
    ) -> Result<()>;

    /// Delete a DHCP option set and wait until it reaches TERMINATED
    async fn delete_dhcp_options(&self, dhcp_id: &str) -> Result<()>;

    /// Delete an internet gateway and wait until it reaches TERMINATED
    async fn delete_internet_gateway(&self, gateway_id: &str) -> Result<()>;

    /// Delete a service gateway and wait until it reaches TERMINATED
    async fn delete_service_gateway(&self, gateway_id: &str) -> Result<()>;

    /// Delete a local peering gateway and wait until it reaches TERMINATED
    async fn delete_local_peering_gateway(&self, gateway_id: &str) -> Result<()>;

    /// Delete a NAT gateway and wait until it reaches TERMINATED
    async fn delete_nat_gateway(&self, gateway_id: &str) -> Result<()>;

    /// Delete the VCN and wait until it reaches TERMINATED
    async fn delete_vcn(&self, vcn_id: &str) -> Result<()>;
}

impl NetworkOps for NetworkClient {
    async fn delete_subnet(&self, subnet_id: &str) -> Result<()> {
        let url = format!("{}/subnets/{}", self.base, subnet_id);
        self.session
            .delete_and_wait(&url, &["TERMINATED"], &format!("subnet {subnet_id}"))
            .await
    }

    async fn delete_security_list(&self, security_list_id: &str) -> Result<()> {
        let url = format!("{}/securityLists/{}", self.base, security_list_id);
        self.session
            .delete_and_wait(
                &url,
                &["TERMINATED"],
                &format!("security list {security_list_id}"),
            )
            .await
    }

    async fn clear_route_rules(&self, route_table_id: &str) -> Result<()> {
        let url = format!("{}/routeTables/{}", self.base, route_table_id);
        self.session
            .put_json(&url, &json!({ "routeRules": [] }))
            .await?;
        self.session
            .wait_until_state(&url, "AVAILABLE", &format!("route table {route_table_id}"))
            .await
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<()> {
        let url = format!("{}/routeTables/{}", self.base, route_table_id);
        self.session
            .delete_and_wait(
                &url,
                &["TERMINATED"],
                &format!("route table {route_table_id}"),
            )
            .await
    }

    async fn get_route_table(&self, route_table_id: &str) -> Result<RouteTableInfo> {
        let url = format!("{}/routeTables/{}", self.base, route_table_id);
        self.session.get_json(&url).await
    }

    async fn list_route_tables(
        &self,
        compartment_id: &str,
        vcn_id: &str,
    ) -> Result<Vec<RouteTableInfo>> {
        let url = format!("{}/routeTables", self.base);
        self.session
            .get_list(&url, &[("compartmentId", compartment_id), ("vcnId", vcn_id)])
            .await
    }

    async fn list_subnets(&self, compartment_id: &str, vcn_id: &str) -> Result<Vec<SubnetInfo>> {
        let url = format!("{}/subnets", self.base);
        self.session
            .get_list(&url, &[("compartmentId", compartment_id), ("vcnId", vcn_id)])
            .await
    }

    async fn reassign_subnet_route_table(
        &self,
        subnet_id: &str,
        route_table_id: &str,
    ) -> Result<()> {
        let url = format!("{}/subnets/{}", self.base, subnet_id);
        self.session
            .put_json(&url, &UpdateSubnetDetails { route_table_id })
            .await?;
        self.session
            .wait_until_state(&url, "AVAILABLE", &format!("subnet {subnet_id}"))
            .await
    }

    async fn delete_dhcp_options(&self, dhcp_id: &str) -> Result<()> {
        let url = format!("{}/dhcps/{}", self.base, dhcp_id);
        self.session
            .delete_and_wait(&url, &["TERMINATED"], &format!("DHCP options {dhcp_id}"))
            .await
    }

    async fn delete_internet_gateway(&self, gateway_id: &str) -> Result<()> {
        let url = format!("{}/internetGateways/{}", self.base, gateway_id);
        self.session
            .delete_and_wait(
                &url,
                &["TERMINATED"],
                &format!("internet gateway {gateway_id}"),
            )
            .await
    }

    async fn delete_service_gateway(&self, gateway_id: &str) -> Result<()> {
        let url = format!("{}/serviceGateways/{}", self.base, gateway_id);
        self.session
            .delete_and_wait(
                &url,
                &["TERMINATED"],
                &format!("service gateway {gateway_id}"),
            )
            .await
    }

    async fn delete_local_peering_gateway(&self, gateway_id: &str) -> Result<()> {
        let url = format!("{}/localPeeringGateways/{}", self.base, gateway_id);
        self.session
            .delete_and_wait(
                &url,
                &["TERMINATED"],
                &format!("local peering gateway {gateway_id}"),
            )
            .await
    }

    async fn delete_nat_gateway(&self, gateway_id: &str) -> Result<()> {
        let url = format!("{}/natGateways/{}", self.base, gateway_id);
        self.session
            .delete_and_wait(&url, &["TERMINATED"], &format!("NAT gateway {gateway_id}"))
            .await
    }

    async fn delete_vcn(&self, vcn_id: &str) -> Result<()> {
        let url = format!("{}/vcns/{}", self.base, vcn_id);
        self.session
            .delete_and_wait(&url, &["TERMINATED"], &format!("VCN {vcn_id}"))
            .await
    }
}
