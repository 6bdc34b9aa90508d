use std::ops::{Deref, DerefMut};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::common::{Email, Id, Position};

/// Core candidate data, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCore {
    pub name: String,
    pub email: Email,
    pub dob: NaiveDate,
    /// The single position this candidate stands for.
    pub position: Position,
    pub party: String,
    /// Opaque reference to the party symbol image.
    pub party_symbol: String,
    /// Argon2 hash; raw passwords are never stored.
    pub password_hash: String,
    /// Tally for the current election cycle; reset to zero whenever an
    /// election is activated.
    pub votes: u64,
}

impl CandidateCore {
    /// Check whether the given password is correct.
    pub fn verify_password<T: AsRef<[u8]>>(&self, password: T) -> bool {
        // Unwrap safe: candidates are only created via registration,
        // which produces a well-formed hash.
        argon2::verify_encoded(&self.password_hash, password.as_ref()).unwrap()
    }
}

/// A candidate without an ID.
pub type NewCandidate = CandidateCore;

/// A stored candidate with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Id,
    #[serde(flatten)]
    pub candidate: CandidateCore,
}

impl Deref for Candidate {
    type Target = CandidateCore;

    fn deref(&self) -> &Self::Target {
        &self.candidate
    }
}

impl DerefMut for Candidate {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.candidate
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;
    use crate::model::api::hash_password;

    impl CandidateCore {
        pub fn example() -> Self {
            Self {
                name: "Asha Rao".to_string(),
                email: "asha.rao@example.com".parse().unwrap(),
                dob: NaiveDate::from_ymd_opt(1975, 2, 28).unwrap(),
                position: Position::Mayor,
                party: "Unity Alliance".to_string(),
                party_symbol: "symbols/rising-sun.svg".to_string(),
                password_hash: hash_password("hustings"),
                votes: 0,
            }
        }

        pub fn example2() -> Self {
            Self {
                name: "Vikram Singh".to_string(),
                email: "vikram.singh@example.com".parse().unwrap(),
                dob: NaiveDate::from_ymd_opt(1981, 7, 19).unwrap(),
                position: Position::Mla,
                party: "Progress Front".to_string(),
                party_symbol: "symbols/banyan-tree.svg".to_string(),
                password_hash: hash_password("stumping"),
                votes: 0,
            }
        }
    }
}
