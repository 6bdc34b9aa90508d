//! API request and response types.
//!
//! Everything here is shaped for the HTTP surface: registrations arrive
//! with raw passwords and leave as hashed records, and the view types
//! returned to clients never include credentials.

pub mod auth;
pub mod ballot;
pub mod candidate;
pub mod election;
pub mod otp;
pub mod stats;
pub mod verification;
pub mod voter;

use chrono::NaiveDate;
use rand::Rng;

/// Minimum accepted password length for registrations.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Hash a raw password for storage.
pub(crate) fn hash_password(password: &str) -> String {
    // 16 bytes is recommended for password hashing:
    //  https://en.wikipedia.org/wiki/Argon2
    let mut salt = [0_u8; 16];
    rand::thread_rng().fill(&mut salt);
    argon2::hash_encoded(password.as_bytes(), &salt, &argon2::Config::default()).unwrap() // Safe because the default `Config` is valid.
}

/// Whole years elapsed between `dob` and `today`; zero if `dob` is in the
/// future.
pub(crate) fn age_on(today: NaiveDate, dob: NaiveDate) -> u32 {
    today.years_since(dob).unwrap_or(0)
}
