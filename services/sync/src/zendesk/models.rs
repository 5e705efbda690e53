use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A brand record from `/api/v2/brands.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskBrand {
    pub id: i64,
    pub name: String,
    pub subdomain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskGroup {
    pub id: i64,
    pub name: String,
}

/// An agent or admin user from `/api/v2/users.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskUser {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub role: String,
    #[serde(default)]
    pub active: bool,
    pub default_group_id: Option<i64>,
}

/// A ticket from the incremental tickets export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskTicket {
    pub id: i64,
    pub brand_id: Option<i64>,
    pub status: String,
    pub priority: Option<String>,
    pub assignee_id: Option<i64>,
    pub group_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Calendar/business minute pair as nested by the metrics endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinutePair {
    pub calendar: Option<i32>,
    pub business: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskTicketMetric {
    pub ticket_id: i64,
    pub reply_time_in_minutes: Option<MinutePair>,
    pub full_resolution_time_in_minutes: Option<MinutePair>,
    pub agent_wait_time_in_minutes: Option<MinutePair>,
    pub requester_wait_time_in_minutes: Option<MinutePair>,
    pub first_resolution_time_in_minutes: Option<MinutePair>,
    #[serde(default)]
    pub reopens: i32,
    #[serde(default)]
    pub replies: i32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskSatisfactionRating {
    pub id: i64,
    pub ticket_id: i64,
    pub score: String,
    pub comment: Option<String>,
    pub assignee_id: Option<i64>,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// An audit event from the incremental ticket events export.
/// `timestamp` is epoch seconds per the export protocol.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketEvent {
    pub id: i64,
    pub ticket_id: i64,
    pub timestamp: i64,
    #[serde(default)]
    pub child_events: Vec<ChildEvent>,
}

/// A single field change nested inside a ticket event. `value` stays untyped
/// because non-status changes carry arrays and objects.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildEvent {
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub value: serde_json::Value,
    #[allow(dead_code)]
    #[serde(default)]
    pub previous_value: serde_json::Value,
}

impl ChildEvent {
    /// True when this change moved the ticket's status to `pending`.
    pub fn is_pending_transition(&self) -> bool {
        self.field_name.as_deref() == Some("status") && self.value.as_str() == Some("pending")
    }
}
