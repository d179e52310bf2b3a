use rocket::{serde::json::Json, Route, State};

use crate::error::Result;
use crate::model::bulletin::BulletinSpec;
use crate::store::Stores;
use crate::submission;
use crate::verifier::Verifier;

pub fn routes() -> Vec<Route> {
    routes![submit_bulletin]
}

#[post("/bulletin", data = "<spec>", format = "json")]
async fn submit_bulletin(
    spec: Json<BulletinSpec>,
    stores: &State<Stores>,
    verifier: &State<Box<dyn Verifier>>,
) -> Result<()> {
    let bulletin = submission::submit_ballot(verifier.inner().as_ref(), stores, spec.0).await?;
    info!(
        "Accepted bulletin {} for candidate {}",
        bulletin.id, bulletin.candidate_id
    );
    Ok(())
}
