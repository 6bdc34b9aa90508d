use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Rejection,
    model::{
        common::{Email, Id, Position},
        db::{Candidate, NewCandidate},
    },
};

use super::{age_on, hash_password, MIN_PASSWORD_LENGTH};

/// Minimum age to stand as a candidate.
pub const MIN_CANDIDATE_AGE: u32 = 25;

/// A candidate registration request. Never stored directly, since the
/// password is in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRegistration {
    pub name: String,
    pub email: Email,
    pub dob: NaiveDate,
    pub position: Position,
    pub party: String,
    pub party_symbol: String,
    pub password: String,
}

impl TryFrom<CandidateRegistration> for NewCandidate {
    type Error = Rejection;

    /// Validate the registration and hash the password.
    fn try_from(registration: CandidateRegistration) -> Result<Self, Self::Error> {
        if registration.name.trim().is_empty() {
            return Err(Rejection::InvalidField("name must not be empty"));
        }
        if registration.party.trim().is_empty() {
            return Err(Rejection::InvalidField("party must not be empty"));
        }
        if registration.password.len() < MIN_PASSWORD_LENGTH {
            return Err(Rejection::InvalidField("password is too short"));
        }
        if age_on(Utc::now().date_naive(), registration.dob) < MIN_CANDIDATE_AGE {
            return Err(Rejection::IneligibleAge(MIN_CANDIDATE_AGE));
        }
        Ok(Self {
            name: registration.name,
            email: registration.email,
            dob: registration.dob,
            position: registration.position,
            party: registration.party,
            party_symbol: registration.party_symbol,
            password_hash: hash_password(&registration.password),
            votes: 0,
        })
    }
}

/// Candidate data as returned by the API: everything except the
/// credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateView {
    pub id: Id,
    pub name: String,
    pub email: Email,
    pub dob: NaiveDate,
    pub position: Position,
    pub party: String,
    pub party_symbol: String,
    pub votes: u64,
}

impl From<Candidate> for CandidateView {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.candidate.name,
            email: candidate.candidate.email,
            dob: candidate.candidate.dob,
            position: candidate.candidate.position,
            party: candidate.candidate.party,
            party_symbol: candidate.candidate.party_symbol,
            votes: candidate.candidate.votes,
        }
    }
}
