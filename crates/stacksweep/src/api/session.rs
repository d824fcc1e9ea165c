//! Shared authenticated API session
//!
//! Holds one authenticated HTTP handle and the per-service endpoint roots
//! for the target region. Service clients are created from the same session
//! without re-reading credentials.
//!
//! Authentication uses the Cloud Shell delegation token; anything beyond
//! attaching it to outgoing requests (signing, rotation) is the
//! environment's responsibility.

use crate::api::error::classify_response;
use crate::wait::{wait_for_state, WaitConfig};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Delegation token location inside a Cloud Shell session
const DELEGATION_TOKEN_PATH: &str = "/etc/oci/delegation_token";

/// Header carrying the delegation token on every request
const DELEGATION_TOKEN_HEADER: &str = "opc-obo-token";

/// Pagination token response header used by all list endpoints
const NEXT_PAGE_HEADER: &str = "opc-next-page";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error body returned by every service on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Lifecycle-state fragment of a resource GET response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LifecycleBody {
    lifecycle_state: Option<String>,
}

/// Authenticated session for one region.
///
/// Cheap to clone; all clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Session {
    http: reqwest::Client,
    region: String,
}

impl Session {
    /// Build a session for the given region (or `$OCI_REGION` when `None`).
    ///
    /// Fails when the delegation token is missing; the sweep must run from
    /// an authenticated Cloud Shell.
    pub fn new(region: Option<&str>) -> Result<Self> {
        let region = match region {
            Some(r) => r.to_string(),
            None => std::env::var("OCI_REGION")
                .context("No region given and OCI_REGION is not set")?,
        };

        let token = std::fs::read_to_string(DELEGATION_TOKEN_PATH)
            .with_context(|| {
                format!(
                    "Delegation token not found at {DELEGATION_TOKEN_PATH}; \
                     run from the Cloud Shell of the tenancy that owns the resources"
                )
            })?
            .trim()
            .to_string();

        let mut headers = reqwest::header::HeaderMap::new();
        let mut token_value = reqwest::header::HeaderValue::from_str(&token)
            .context("Delegation token contains invalid header characters")?;
        token_value.set_sensitive(true);
        headers.insert(DELEGATION_TOKEN_HEADER, token_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, region })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    // ── Service endpoint roots ─────────────────────────────────────────────

    pub fn search_endpoint(&self) -> String {
        format!("https://query.{}.oraclecloud.com/20180409", self.region)
    }

    /// Core services (compute, block storage, virtual network)
    pub fn core_endpoint(&self) -> String {
        format!("https://iaas.{}.oraclecloud.com/20160918", self.region)
    }

    pub fn identity_endpoint(&self) -> String {
        format!("https://identity.{}.oraclecloud.com/20160918", self.region)
    }

    pub fn load_balancer_endpoint(&self) -> String {
        format!("https://iaas.{}.oraclecloud.com/20170115", self.region)
    }

    pub fn logging_endpoint(&self) -> String {
        format!("https://logging.{}.oci.oraclecloud.com/20200531", self.region)
    }

    pub fn file_storage_endpoint(&self) -> String {
        format!("https://filestorage.{}.oraclecloud.com/20171215", self.region)
    }

    pub fn monitoring_endpoint(&self) -> String {
        format!("https://telemetry.{}.oraclecloud.com/20180401", self.region)
    }

    pub fn artifacts_endpoint(&self) -> String {
        format!("https://artifacts.{}.oci.oraclecloud.com/20160918", self.region)
    }

    pub fn notifications_endpoint(&self) -> String {
        format!(
            "https://notification.{}.oci.oraclecloud.com/20181201",
            self.region
        )
    }

    pub fn functions_endpoint(&self) -> String {
        format!("https://functions.{}.oci.oraclecloud.com/20181201", self.region)
    }

    pub fn events_endpoint(&self) -> String {
        format!("https://events.{}.oci.oraclecloud.com/20181121", self.region)
    }

    // ── HTTP helpers ───────────────────────────────────────────────────────

    /// Convert a non-2xx response into a classified [`crate::api::ApiError`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ErrorBody = response.json().await.unwrap_or(ErrorBody {
            code: None,
            message: None,
        });
        Err(classify_response(status.as_u16(), body.code.as_deref(), body.message.as_deref()).into())
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to decode response from {url}"))
    }

    /// GET a list endpoint, transparently concatenating all pages.
    ///
    /// List responses are JSON arrays; the next page token travels in the
    /// `opc-next-page` response header.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page: Option<String> = None;

        loop {
            let mut request = self.http.get(url).query(query);
            if let Some(p) = &page {
                request = request.query(&[("page", p.as_str())]);
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("GET {url} failed"))?;
            let response = Self::check(response).await?;

            let next = response
                .headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            let mut batch: Vec<T> = response
                .json()
                .await
                .with_context(|| format!("Failed to decode response from {url}"))?;
            items.append(&mut batch);

            match next {
                Some(p) => page = Some(p),
                None => break,
            }
        }

        debug!(url = %url, count = items.len(), "Listed resources");
        Ok(items)
    }

    /// POST a JSON body, returning the decoded response and the next-page token.
    pub(crate) async fn post_json_page<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        page: Option<&str>,
    ) -> Result<(T, Option<String>)> {
        let mut request = self.http.post(url).json(body);
        if let Some(p) = page {
            request = request.query(&[("page", p)]);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?;
        let response = Self::check(response).await?;

        let next = response
            .headers()
            .get(NEXT_PAGE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let decoded = response
            .json()
            .await
            .with_context(|| format!("Failed to decode response from {url}"))?;
        Ok((decoded, next))
    }

    /// POST with no response body of interest (provider actions).
    pub(crate) async fn post_action(&self, url: &str) -> Result<()> {
        let response = self
            .http
            .post(url)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?;
        Self::check(response).await?;
        Ok(())
    }

    pub(crate) async fn put_json<B: Serialize>(&self, url: &str, body: &B) -> Result<()> {
        let response = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("PUT {url} failed"))?;
        Self::check(response).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, url: &str) -> Result<()> {
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .with_context(|| format!("DELETE {url} failed"))?;
        Self::check(response).await?;
        Ok(())
    }

    // ── Lifecycle waiting ──────────────────────────────────────────────────

    /// Poll a resource URL until it reports one of `terminal_states` or is gone.
    pub(crate) async fn wait_until_gone(
        &self,
        url: &str,
        terminal_states: &[&str],
        label: &str,
    ) -> Result<()> {
        wait_for_state(
            WaitConfig::default(),
            || async {
                match self.get_json::<LifecycleBody>(url).await {
                    Ok(body) => Ok(body
                        .lifecycle_state
                        .map(|s| terminal_states.contains(&s.as_str()))
                        .unwrap_or(true)),
                    Err(e) if crate::api::error::error_is_not_found(&e) => Ok(true),
                    Err(e) => Err(e),
                }
            },
            label,
        )
        .await
    }

    /// Poll a resource URL until it reports the target lifecycle state.
    pub(crate) async fn wait_until_state(
        &self,
        url: &str,
        target_state: &str,
        label: &str,
    ) -> Result<()> {
        wait_for_state(
            WaitConfig::default(),
            || async {
                let body = self.get_json::<LifecycleBody>(url).await?;
                Ok(body.lifecycle_state.as_deref() == Some(target_state))
            },
            label,
        )
        .await
    }

    /// Delete a resource and block until it reaches a terminal state.
    pub(crate) async fn delete_and_wait(
        &self,
        url: &str,
        terminal_states: &[&str],
        label: &str,
    ) -> Result<()> {
        self.delete(url).await?;
        self.wait_until_gone(url, terminal_states, label).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
