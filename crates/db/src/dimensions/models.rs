use serde::{Deserialize, Serialize};

/// A helpdesk brand (one subdomain of the upstream account).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub subdomain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

/// An agent or admin user on the upstream account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub role: String,
    pub active: bool,
    pub default_group_id: Option<i64>,
}
