use rocket::{serde::json::Json, Route, State};

use crate::error::Result;
use crate::model::candidate::{CandidateDescription, CandidateResult, CandidateSpec};
use crate::store::Stores;
use crate::tally;

pub fn routes() -> Vec<Route> {
    routes![create_candidate, get_candidates, get_results]
}

#[post("/candidate", data = "<spec>", format = "json")]
async fn create_candidate(
    spec: Json<CandidateSpec>,
    stores: &State<Stores>,
) -> Result<Json<CandidateDescription>> {
    let candidate = stores.candidates.insert(&spec.fullname).await?;
    info!("Registered candidate '{}' ({})", candidate.fullname, candidate.id);
    Ok(Json(candidate.into()))
}

#[get("/candidate")]
async fn get_candidates(stores: &State<Stores>) -> Result<Json<Vec<CandidateDescription>>> {
    let candidates = stores.candidates.all().await?;
    Ok(Json(candidates.into_iter().map(Into::into).collect()))
}

#[get("/candidate/results")]
async fn get_results(stores: &State<Stores>) -> Result<Json<Vec<CandidateResult>>> {
    Ok(Json(tally::compute_results(stores).await?))
}
