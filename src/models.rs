//! Response shapes for the Atlas endpoints this crate touches.
//!
//! Fields the API adds later are ignored; fields absent from a response
//! fall back to defaults rather than failing the whole decode.

use serde::Deserialize;

/// Top-level response from the projects (groups) listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectList {
    pub links: Vec<Link>,
    pub results: Vec<Project>,
    pub total_count: i64,
}

/// An Atlas project, also called a group.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub cluster_count: i64,
    pub created: String,
    pub links: Vec<Link>,
    pub name: String,
    pub org_id: String,
}

/// Top-level response from the cluster listing of one project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterList {
    pub links: Vec<Link>,
    pub results: Vec<Cluster>,
    pub total_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cluster {
    pub group_id: String,
    pub id: String,
    pub name: String,
    pub paused: bool,
    pub pit_enabled: bool,
    pub provider_backup_enabled: bool,
    pub backup_enabled: bool,
    pub cluster_type: String,
    pub srv_address: String,
    pub state_name: String,
    pub num_shards: i64,
    pub replication_factor: i64,
    pub create_date: String,
    #[serde(rename = "diskSizeGB")]
    pub disk_size_gb: f64,
    #[serde(rename = "mongoDBMajorVersion")]
    pub mongodb_major_version: String,
    #[serde(rename = "mongoDBVersion")]
    pub mongodb_version: String,
    #[serde(rename = "mongoURI")]
    pub mongo_uri: String,
    #[serde(rename = "mongoURIUpdated")]
    pub mongo_uri_updated: String,
    pub connection_strings: ConnectionStrings,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionStrings {
    pub standard_srv: String,
    pub standard: String,
}

/// HATEOAS link attached to most Atlas responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
    pub rel: String,
}
