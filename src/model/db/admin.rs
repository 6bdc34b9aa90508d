use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::model::common::{Email, Id};

/// Name of the admin seeded into an empty store.
pub const DEFAULT_ADMIN_NAME: &str = "Admin User";

/// Email of the admin seeded into an empty store.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@election.com";

/// Password of the admin seeded into an empty store. Fine for a demo;
/// a real deployment would change it immediately.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Core admin user data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCore {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
}

impl AdminCore {
    /// The default admin seeded when no admin account exists.
    pub fn default_admin() -> Self {
        Self {
            name: DEFAULT_ADMIN_NAME.to_string(),
            // Unwrap safe: the default email is a valid literal.
            email: DEFAULT_ADMIN_EMAIL.parse().unwrap(),
            password_hash: crate::model::api::hash_password(DEFAULT_ADMIN_PASSWORD),
        }
    }

    /// Check whether the given password is correct.
    pub fn verify_password<T: AsRef<[u8]>>(&self, password: T) -> bool {
        // Unwrap safe: admins are only created via `default_admin`, so
        // the hash is always well-formed.
        argon2::verify_encoded(&self.password_hash, password.as_ref()).unwrap()
    }
}

/// An admin without an ID.
pub type NewAdmin = AdminCore;

/// A stored admin user with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: Id,
    #[serde(flatten)]
    pub admin: AdminCore,
}

impl Deref for Admin {
    type Target = AdminCore;

    fn deref(&self) -> &Self::Target {
        &self.admin
    }
}

impl DerefMut for Admin {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_admin_credentials() {
        let admin = AdminCore::default_admin();
        assert_eq!(admin.email.as_str(), DEFAULT_ADMIN_EMAIL);
        assert!(admin.verify_password(DEFAULT_ADMIN_PASSWORD));
        assert!(!admin.verify_password("admin1234"));
    }
}
