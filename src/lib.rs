#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod model;

pub use config::Config;

/// Assemble the server: every route, plus the config, store and logging
/// fairings. Ignition loads the config and opens the store.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(config::ConfigFairing)
        .attach(config::StoreFairing)
        .attach(logging::LoggerFairing)
}
