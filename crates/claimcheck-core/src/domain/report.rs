//! Whole-request responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::verdict::ClaimResult;

/// Response to one "fact-check text" request.
///
/// `claims` holds one entry per extracted claim, in extraction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResponse {
    pub text: String,
    pub claims: Vec<ClaimResult>,
}

/// A response plus the bookkeeping of the check that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckReport {
    pub check_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub response: FactCheckResponse,
}
