//! Backend for an anonymous ring-signature ballot platform.
//!
//! Signers cast ballots by producing a ring signature over an anonymity set
//! of registered public keys; an external verifier checks each signature and
//! derives a per-signature nonce that keeps every signer to at most one
//! counted vote, without the application ever learning who voted.

#[macro_use]
extern crate log;
#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod submission;
pub mod tally;
pub mod verifier;

use crate::config::{DatabaseFairing, VerifierFairing};
use crate::logging::LoggerFairing;

/// Assemble the server: routes, verifier client, database, request logging.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(VerifierFairing)
        .attach(DatabaseFairing)
        .attach(LoggerFairing)
}

/// A local client over in-memory stores and the given verifier, for
/// exercising routes without a database or network.
#[cfg(test)]
pub(crate) async fn client_for_tests(
    verifier: Box<dyn verifier::Verifier>,
) -> (rocket::local::asynchronous::Client, store::Stores) {
    let stores = store::Stores::in_memory();
    let rocket = rocket::build()
        .mount("/", api::routes())
        .manage(stores.clone())
        .manage(verifier);
    let client = rocket::local::asynchronous::Client::tracked(rocket)
        .await
        .unwrap();
    (client, stores)
}
