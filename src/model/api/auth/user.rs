use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::model::{
    common::{Email, Id},
    db::{Admin, Candidate, Voter},
};

/// A user of our application, having defined rights.
pub trait User {
    /// The rights of this user type.
    const RIGHTS: Rights;
    /// Get the user's ID.
    fn id(&self) -> Id;
}

/// Different privilege levels.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Rights {
    Voter = 0,
    Candidate = 1,
    Admin = 2,
}

impl Display for Rights {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Voter => "voter",
                Self::Candidate => "candidate",
                Self::Admin => "admin",
            }
        )
    }
}

impl User for Voter {
    const RIGHTS: Rights = Rights::Voter;

    fn id(&self) -> Id {
        self.id
    }
}

impl User for Candidate {
    const RIGHTS: Rights = Rights::Candidate;

    fn id(&self) -> Id {
        self.id
    }
}

impl User for Admin {
    const RIGHTS: Rights = Rights::Admin;

    fn id(&self) -> Id {
        self.id
    }
}

/// Any stored user together with its role: the unified login view over
/// the voter, candidate and admin collections. Derived on demand, never
/// stored.
#[derive(Debug, Clone)]
pub enum AnyUser {
    Voter(Voter),
    Candidate(Candidate),
    Admin(Admin),
}

impl AnyUser {
    pub fn rights(&self) -> Rights {
        match self {
            Self::Voter(_) => Rights::Voter,
            Self::Candidate(_) => Rights::Candidate,
            Self::Admin(_) => Rights::Admin,
        }
    }

    /// Check the given password against this user's stored hash.
    pub fn verify_password<T: AsRef<[u8]>>(&self, password: T) -> bool {
        match self {
            Self::Voter(voter) => voter.verify_password(password),
            Self::Candidate(candidate) => candidate.verify_password(password),
            Self::Admin(admin) => admin.verify_password(password),
        }
    }
}

/// The role-tagged user summary returned to authenticated clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Id,
    pub name: String,
    pub email: Email,
    pub role: String,
}

impl From<AnyUser> for UserInfo {
    fn from(user: AnyUser) -> Self {
        let role = user.rights().to_string();
        match user {
            AnyUser::Voter(voter) => Self {
                id: voter.id,
                name: voter.voter.name,
                email: voter.voter.email,
                role,
            },
            AnyUser::Candidate(candidate) => Self {
                id: candidate.id,
                name: candidate.candidate.name,
                email: candidate.candidate.email,
                role,
            },
            AnyUser::Admin(admin) => Self {
                id: admin.id,
                name: admin.admin.name,
                email: admin.admin.email,
                role,
            },
        }
    }
}
