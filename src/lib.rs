//! Digest-authenticated client for the MongoDB Atlas administration API.
//!
//! Atlas gates its control-plane endpoints behind HTTP Digest Authentication
//! (RFC 2617 style, `qop=auth`, MD5). Every call here runs the full two-trip
//! handshake: an unauthenticated request draws a 401 challenge, the
//! challenge is folded into an `Authorization` header, and the identical
//! request is resent. Responses may come back gzip-compressed with the
//! decompressed length appended as a trailing little-endian 32-bit integer;
//! the framing decoder honors that trailer rather than the gzip stream's
//! own end.
//!
//! The engine is stateless per call - the nonce count is the literal 1 and
//! no challenge is ever cached - so a single client can serve concurrent
//! callers.
//!
//! # Examples
//!
//! Computing a digest header from a challenge:
//!
//! ```
//! use atlas_client::{Credentials, DigestHeader, HttpMethod, WwwAuthFields};
//!
//! // Value from the WWW-Authenticate header of the 401 response
//! let challenge = WwwAuthFields::parse(
//!     r#"Digest realm="MMS Public API", domain="", nonce="abc123", algorithm=MD5, qop="auth", stale=false"#,
//! ).unwrap();
//!
//! let creds = Credentials::new("pubkey", "privkey");
//! // The cnonce is pinned here for the doctest; the client generates a
//! // fresh 8-character nonce per handshake.
//! let header = DigestHeader::compute(
//!     &creds,
//!     &challenge,
//!     HttpMethod::Get,
//!     "/api/atlas/v1.0/groups",
//!     "AAAAAAAA",
//! );
//!
//! assert_eq!(
//!     header.to_string(),
//!     r#"Digest username="pubkey", realm="MMS Public API", nonce="abc123", uri="/api/atlas/v1.0/groups", algorithm=MD5, response="40fb7cc6c3eb58e81c7ffff78882920b", qop=auth, nc=00000001, cnonce="AAAAAAAA""#,
//! );
//! ```
//!
//! Talking to Atlas:
//!
//! ```no_run
//! # async fn run() -> Result<(), atlas_client::Error> {
//! use atlas_client::AtlasClient;
//!
//! let client = AtlasClient::new("pubkey", "privkey", false)?;
//!
//! let projects = client.get_projects().await?;
//! println!("{} projects visible", projects.total_count);
//!
//! // pause a cluster; pass false to resume it
//! let cluster = client.set_cluster_paused("5f1project", "Cluster0", true).await?;
//! println!("{} paused: {}", cluster.name, cluster.paused);
//! # Ok(())
//! # }
//! ```

mod challenge;
mod client;
mod digest;
mod enums;
mod error;
mod framing;
mod models;
mod transport;
mod utils;

pub use crate::challenge::WwwAuthFields;
pub use crate::client::AtlasClient;
pub use crate::digest::{Credentials, DigestHeader, NonceSource, RandomNonce};
pub use crate::enums::HttpMethod;
pub use crate::error::{Error, Result};
pub use crate::framing::decode_body;
pub use crate::models::{Cluster, ClusterList, ConnectionStrings, Link, Project, ProjectList};
pub use crate::transport::{ApiRequest, ApiResponse, ReqwestTransport, RequestBody, Transport};
pub use crate::utils::md5_hex;
