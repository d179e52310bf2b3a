use rocket::Route;

mod bulletin;
mod candidate;
mod signer;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(candidate::routes());
    routes.extend(signer::routes());
    routes.extend(bulletin::routes());
    routes
}
