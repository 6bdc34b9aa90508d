use serde::{Deserialize, Serialize};

use crate::model::db::Election;

/// Dashboard statistics: a consistent snapshot of live records. Nothing
/// here is stored; deleting a record changes the next snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_voters: u64,
    pub total_candidates: u64,
    pub voters_voted: u64,
    pub active_election: Option<Election>,
}
