use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::{Id, Position};

/// A ballot the voter wishes to cast for a specific candidate. The voter
/// is identified by their auth token, never by the request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub candidate_id: Id,
}

/// Acknowledgement of a recorded ballot. Derived, not stored: the
/// registry keeps only per-candidate tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub election_id: Id,
    pub voter_id: Id,
    pub candidate_id: Id,
    pub position: Position,
    pub cast_at: DateTime<Utc>,
}
