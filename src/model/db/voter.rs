use std::ops::{Deref, DerefMut};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::common::{Email, Id, NationalId, Phone};

/// Core voter data, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterCore {
    pub name: String,
    pub email: Email,
    pub dob: NaiveDate,
    pub phone: Phone,
    pub national_id: NationalId,
    /// Argon2 hash; raw passwords are never stored.
    pub password_hash: String,
    /// Opaque reference to a captured face image, when one was provided.
    pub face_image: Option<String>,
    /// Set when the voter casts a ballot; cleared whenever an election is
    /// activated.
    pub has_voted: bool,
}

impl VoterCore {
    /// Check whether the given password is correct.
    pub fn verify_password<T: AsRef<[u8]>>(&self, password: T) -> bool {
        // Unwrap safe: voters are only created via registration, which
        // produces a well-formed hash.
        argon2::verify_encoded(&self.password_hash, password.as_ref()).unwrap()
    }
}

/// A voter without an ID.
pub type NewVoter = VoterCore;

/// A stored voter with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: Id,
    #[serde(flatten)]
    pub voter: VoterCore,
}

impl Deref for Voter {
    type Target = VoterCore;

    fn deref(&self) -> &Self::Target {
        &self.voter
    }
}

impl DerefMut for Voter {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.voter
    }
}
