use chrono::Duration;
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::{ledger::Ledger, model::store::Store};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    otp_ttl: u32,
    auth_ttl: u32,
    // secrets
    jwt_secret: String,
}

impl Config {
    /// Valid lifetime of a phone verification code in seconds.
    pub fn otp_ttl(&self) -> Duration {
        Duration::seconds(self.otp_ttl.into())
    }

    /// Valid lifetime of auth token cookies in seconds.
    pub fn auth_ttl(&self) -> Duration {
        Duration::seconds(self.auth_ttl.into())
    }

    /// Secret key used to encrypt JWTs.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

/// A fairing that loads the application config and puts it in managed state.
/// `AdHoc::config` would also work, but writing it out keeps it symmetric
/// with the store fairing and gives control over the error messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Configuration for the backing store.
#[cfg(not(test))]
#[derive(Deserialize)]
struct StoreConfig {
    store_path: String,
}

/// A fairing that opens the backing store, seeds the default admin if
/// needed, and places the [`Ledger`] into managed state.
pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Store",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config and open the backing file.
        #[cfg(not(test))]
        let store = {
            let config = match rocket.figment().extract::<StoreConfig>() {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to load store config");
                    rocket::config::pretty_print_error(e);
                    return Err(rocket);
                }
            };
            info!("Loaded store config, opening {}...", config.store_path);
            match Store::open(config.store_path.into()) {
                Ok(store) => store,
                Err(e) => {
                    error!("Failed to open store: {e}");
                    return Err(rocket);
                }
            }
        };
        // Tests get a fresh in-memory store to avoid collisions.
        #[cfg(test)]
        let store = Store::in_memory();

        let ledger = Ledger::new(store);
        if let Err(e) = ledger.ensure_admin_exists() {
            error!("Failed to seed the default admin: {e}");
            return Err(rocket);
        }
        info!("...store ready!");

        // Manage the state.
        rocket = rocket.manage(ledger);
        Ok(rocket)
    }
}
