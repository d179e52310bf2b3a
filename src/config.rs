use std::time::Duration;

use mongodb::Client as MongoClient;
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::store::{mongo::ensure_indexes_exist, Stores};
use crate::verifier::{HttpVerifier, Verifier};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Deserialize)]
pub struct Config {
    verifier_url: String,
    verifier_timeout: u32,
}

impl Config {
    /// Endpoint of the external ring-signature verifier.
    pub fn verifier_url(&self) -> &str {
        &self.verifier_url
    }

    /// Hard deadline for a single verification round trip, in seconds.
    pub fn verifier_timeout(&self) -> Duration {
        Duration::from_secs(self.verifier_timeout.into())
    }
}

/// A fairing that loads the verifier config and places the production
/// verifier client into managed state.
pub struct VerifierFairing;

#[rocket::async_trait]
impl Fairing for VerifierFairing {
    fn info(&self) -> Info {
        Info {
            name: "Verifier",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load verifier config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Construct the client.
        let url = config.verifier_url().to_string();
        let verifier = match HttpVerifier::new(url, config.verifier_timeout()) {
            Ok(verifier) => verifier,
            Err(e) => {
                error!("Failed to construct verifier client: {e}");
                return Err(rocket);
            }
        };
        info!("Verifying signatures via {}", config.verifier_url());

        // Manage the state.
        rocket = rocket
            .manage(Box::new(verifier) as Box<dyn Verifier>)
            .manage(config);
        Ok(rocket)
    }
}

/// Configuration for the database.
#[derive(Deserialize)]
struct DbConfig {
    // secrets
    db_uri: String,
}

/// A fairing that loads the MongoDB config, connects to the database,
/// ensures the unique indexes exist, and places the store handles into
/// managed state.
pub struct DatabaseFairing;

#[rocket::async_trait]
impl Fairing for DatabaseFairing {
    fn info(&self) -> Info {
        Info {
            name: "MongoDB",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<DbConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load database config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        info!("Loaded database config, connecting...");

        // Construct the connection.
        let client = match MongoClient::with_uri_str(&config.db_uri).await {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to connect to database: {e}");
                return Err(rocket);
            }
        };
        let db = client.database(&get_database_name());

        // The index on `bulletins.u_number` is what makes ballot submission
        // at-most-once; refuse to launch without it.
        if let Err(e) = ensure_indexes_exist(&db).await {
            error!("Failed to prepare database indexes: {e}");
            return Err(rocket);
        }
        info!("...database connection online!");

        // Manage the state.
        rocket = rocket.manage(Stores::mongo(&db));
        Ok(rocket)
    }
}

/// Get the name of the database to use (production version).
#[cfg(not(test))]
fn get_database_name() -> String {
    "ringvote".to_string()
}

/// Get the name of the database to use (test version).
/// Use a random name to avoid collisions between tests.
#[cfg(test)]
fn get_database_name() -> String {
    let random: u32 = rand::random();
    let db = format!("test{random}");
    info!("Using database {db}");
    db
}
