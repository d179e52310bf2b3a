use rocket::{serde::json::Json, Route, State};

use crate::error::Result;
use crate::model::ring::{Ring, MAX_RING};
use crate::model::signer::SignerSpec;
use crate::store::Stores;

pub fn routes() -> Vec<Route> {
    routes![register_signer, get_ring]
}

#[post("/signer", data = "<spec>", format = "json")]
async fn register_signer(spec: Json<SignerSpec>, stores: &State<Stores>) -> Result<()> {
    let signer = stores
        .signers
        .insert(&spec.full_name, &spec.public_key)
        .await?;
    info!("Registered signer '{}' ({})", signer.fullname, signer.id);
    Ok(())
}

/// Build an anonymity set from the signer pool. Without `exp` the ring is as
/// large as the pool allows.
#[get("/signer/ring?<exp>")]
async fn get_ring(exp: Option<i64>, stores: &State<Stores>) -> Result<Json<Ring>> {
    let pool = stores.signers.public_keys().await?;
    let ring = Ring::select(pool, exp.unwrap_or(MAX_RING));
    info!("Built a ring of {} keys (2^{})", ring.ring_size, ring.exp);
    Ok(Json(ring))
}
