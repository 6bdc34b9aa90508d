//! Stored record types: what actually lives in the store's collections.
//!
//! Each record comes in two flavours: a `*Core` carrying the data, and a
//! wrapper adding the assigned ID. Raw credentials never appear here,
//! only their argon2 hashes.

mod admin;
pub use admin::{
    Admin, AdminCore, NewAdmin, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME, DEFAULT_ADMIN_PASSWORD,
};

mod candidate;
pub use candidate::{Candidate, CandidateCore, NewCandidate};

mod election;
pub use election::{Election, ElectionCore, NewElection};

mod voter;
pub use voter::{NewVoter, Voter, VoterCore};
