use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::challenge::WwwAuthFields;
use crate::digest::{Credentials, DigestHeader, NonceSource, RandomNonce};
use crate::enums::HttpMethod;
use crate::framing::decode_body;
use crate::models::{Cluster, ClusterList, ProjectList};
use crate::transport::{ApiRequest, ReqwestTransport, RequestBody, Transport};
use crate::{Error, Result};

/// The Atlas API authority
const API_BASE: &str = "https://cloud.mongodb.com";

/// The versioned API root every path hangs off
const API_DIR: &str = "/api/atlas/v1.0";

/// Client nonce length used for every handshake
const CNONCE_LEN: usize = 8;

/// Digest-authenticated client for the Atlas administration API.
///
/// Holds immutable credentials plus the injected transport and nonce
/// source; nothing else. Each call is a self-contained two-trip handshake,
/// so one instance is safe to share across concurrent callers.
pub struct AtlasClient {
    creds: Credentials,
    transport: Arc<dyn Transport>,
    noncer: Arc<dyn NonceSource>,
    base: String,
}

impl AtlasClient {
    /// Client with the default reqwest transport and random nonce source.
    /// Pass `zip_response = true` to ask Atlas for gzip-framed bodies.
    pub fn new(public_key: &str, private_key: &str, zip_response: bool) -> Result<Self> {
        Ok(Self::with_parts(
            Credentials::new(public_key, private_key),
            Arc::new(ReqwestTransport::new(zip_response)?),
            Arc::new(RandomNonce),
        ))
    }

    /// Assemble from explicit collaborators; the seam the tests use.
    pub fn with_parts(
        creds: Credentials,
        transport: Arc<dyn Transport>,
        noncer: Arc<dyn NonceSource>,
    ) -> Self {
        Self {
            creds,
            transport,
            noncer,
            base: API_BASE.to_string(),
        }
    }

    /// Run the two-trip Digest handshake for one request.
    ///
    /// The first send goes out unauthenticated and is expected to draw a
    /// 401 challenge. The challenge is folded into an `Authorization`
    /// header and the identical request - same method, path and body
    /// bytes - is resent; that second response is authoritative. Any
    /// non-401 first status is final and passes through unauthenticated.
    ///
    /// Neither trip is ever retried here. A failed call must start over
    /// from scratch: replaying a stale header after nc 1 is consumed
    /// would produce an invalid digest under the full protocol.
    pub async fn perform_authenticated(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<(u16, String)> {
        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base, path),
            authorization: None,
            body,
        };

        let first = self.transport.send(&request).await?;

        if first.status != 401 {
            warn!(status = first.status, "no digest challenge; passing response through");
            let text = decode_body(&first.content_encoding, &first.body)?;
            return Ok((first.status, text));
        }

        let header = first.www_authenticate.as_deref().ok_or_else(|| {
            Error::BadChallenge("401 without a WWW-Authenticate header".to_string())
        })?;
        let challenge = WwwAuthFields::parse(header)?;
        debug!(realm = %challenge.realm, "received digest challenge");

        let cnonce = self.noncer.generate(CNONCE_LEN);
        let authorization = DigestHeader::compute(&self.creds, &challenge, method, path, &cnonce);

        let authed = ApiRequest {
            authorization: Some(authorization.to_string()),
            ..request
        };
        let last = self.transport.send(&authed).await?;

        let text = decode_body(&last.content_encoding, &last.body)?;
        Ok((last.status, text))
    }

    /// The projects (aka groups) this key pair has access to.
    pub async fn get_projects(&self) -> Result<ProjectList> {
        self.get_json(&format!("{API_DIR}/groups")).await
    }

    /// All cluster info for every cluster in a project.
    pub async fn get_clusters(&self, project_id: &str) -> Result<ClusterList> {
        let project_id = required(project_id, "project_id")?;
        self.get_json(&format!("{API_DIR}/groups/{project_id}/clusters"))
            .await
    }

    /// Full details of the named cluster.
    pub async fn get_cluster_info(&self, project_id: &str, cluster_name: &str) -> Result<Cluster> {
        let project_id = required(project_id, "project_id")?;
        let cluster_name = required(cluster_name, "cluster_name")?;
        self.get_json(&format!(
            "{API_DIR}/groups/{project_id}/clusters/{cluster_name}"
        ))
        .await
    }

    /// Pause (`true`) or resume (`false`) the named cluster.
    pub async fn set_cluster_paused(
        &self,
        project_id: &str,
        cluster_name: &str,
        pause: bool,
    ) -> Result<Cluster> {
        let project_id = required(project_id, "project_id")?;
        let cluster_name = required(cluster_name, "cluster_name")?;

        let body = RequestBody {
            content_type: "application/json".to_string(),
            bytes: serde_json::to_vec(&json!({ "paused": pause }))?,
        };

        let path = format!("{API_DIR}/groups/{project_id}/clusters/{cluster_name}");
        let (status, text) = self
            .perform_authenticated(HttpMethod::Patch, &path, Some(body))
            .await?;
        debug!(status, %path, "cluster pause state patched");

        Ok(serde_json::from_str(&text)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (status, text) = self
            .perform_authenticated(HttpMethod::Get, path, None)
            .await?;
        debug!(status, path, "atlas response received");

        Ok(serde_json::from_str(&text)?)
    }
}

fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::MissingParameter(name));
    }
    Ok(value)
}
