use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Rejection,
    model::{
        common::{Email, Id, NationalId, Phone},
        db::{NewVoter, Voter},
    },
};

use super::{age_on, hash_password, MIN_PASSWORD_LENGTH};

/// Minimum age to register as a voter.
pub const MIN_VOTER_AGE: u32 = 18;

/// A voter registration request. Never stored directly, since the
/// password is in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoterRegistration {
    pub name: String,
    pub email: Email,
    pub dob: NaiveDate,
    pub phone: Phone,
    pub national_id: NationalId,
    pub password: String,
    pub face_image: Option<String>,
}

impl TryFrom<VoterRegistration> for NewVoter {
    type Error = Rejection;

    /// Validate the registration and hash the password.
    fn try_from(registration: VoterRegistration) -> Result<Self, Self::Error> {
        if registration.name.trim().is_empty() {
            return Err(Rejection::InvalidField("name must not be empty"));
        }
        if registration.password.len() < MIN_PASSWORD_LENGTH {
            return Err(Rejection::InvalidField("password is too short"));
        }
        if age_on(Utc::now().date_naive(), registration.dob) < MIN_VOTER_AGE {
            return Err(Rejection::IneligibleAge(MIN_VOTER_AGE));
        }
        Ok(Self {
            name: registration.name,
            email: registration.email,
            dob: registration.dob,
            phone: registration.phone,
            national_id: registration.national_id,
            password_hash: hash_password(&registration.password),
            face_image: registration.face_image,
            has_voted: false,
        })
    }
}

/// Voter data as returned by the API: everything except the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterView {
    pub id: Id,
    pub name: String,
    pub email: Email,
    pub dob: NaiveDate,
    pub phone: Phone,
    pub national_id: NationalId,
    pub face_image: Option<String>,
    pub has_voted: bool,
}

impl From<Voter> for VoterView {
    fn from(voter: Voter) -> Self {
        Self {
            id: voter.id,
            name: voter.voter.name,
            email: voter.voter.email,
            dob: voter.voter.dob,
            phone: voter.voter.phone,
            national_id: voter.voter.national_id,
            face_image: voter.voter.face_image,
            has_voted: voter.voter.has_voted,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_hashes_password() {
        let registration = VoterRegistration::example();
        let voter: NewVoter = registration.clone().try_into().unwrap();
        assert_ne!(voter.password_hash, registration.password);
        assert!(voter.verify_password(&registration.password));
        assert!(!voter.has_voted);
    }

    #[test]
    fn underage_registration_rejected() {
        let result: Result<NewVoter, _> =
            VoterRegistration::underage_example().try_into();
        assert_eq!(result.unwrap_err(), Rejection::IneligibleAge(MIN_VOTER_AGE));
    }

    #[test]
    fn weak_password_rejected() {
        let mut registration = VoterRegistration::example();
        registration.password = "abc".to_string();
        let result: Result<NewVoter, _> = registration.try_into();
        assert!(matches!(result, Err(Rejection::InvalidField(_))));
    }

    #[test]
    fn blank_name_rejected() {
        let mut registration = VoterRegistration::example();
        registration.name = "   ".to_string();
        let result: Result<NewVoter, _> = registration.try_into();
        assert!(matches!(result, Err(Rejection::InvalidField(_))));
    }

    #[test]
    fn view_hides_credentials() {
        let voter = Voter {
            id: Id::new(),
            voter: VoterRegistration::example().try_into().unwrap(),
        };
        let json = serde_json::to_value(VoterView::from(voter)).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
