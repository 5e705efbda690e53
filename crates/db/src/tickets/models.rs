use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ticket row as persisted locally.
///
/// `first_pending_at` is owned by the pending-event reconciliation and is
/// never written by the plain ticket upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub brand_id: Option<i64>,
    pub status: String,
    pub priority: Option<String>,
    pub assignee_id: Option<i64>,
    pub group_id: Option<i64>,
    pub tags: Vec<String>,
    pub language_code: Option<String>,
    pub language_name: Option<String>,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Timing aggregates for one ticket, keyed by the ticket id itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketMetric {
    pub ticket_id: i64,
    pub reply_time_calendar_minutes: Option<i32>,
    pub reply_time_business_minutes: Option<i32>,
    pub full_resolution_time_calendar_minutes: Option<i32>,
    pub full_resolution_time_business_minutes: Option<i32>,
    pub agent_wait_time_minutes: Option<i32>,
    pub requester_wait_time_minutes: Option<i32>,
    pub first_resolution_time_minutes: Option<i32>,
    pub reopens: i32,
    pub replies: i32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatisfactionRating {
    pub id: i64,
    pub ticket_id: i64,
    pub score: String,
    pub comment: Option<String>,
    pub assignee_id: Option<i64>,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
