use serde::{Deserialize, Serialize};

/// A login request. The email is deliberately an unvalidated string: a
/// malformed address simply matches no user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
