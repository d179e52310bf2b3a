use mongodb::error::Error as DbError;
use rocket::{
    http::{Status, StatusClass},
    response::Responder,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while handling a request.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),
    /// The verifier looked at the signature and said no, or answered with
    /// something we could not make sense of.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    /// The verifier could not be reached at all. Kept distinct from
    /// `InvalidSignature` so operators can tell a bad vote from an outage.
    #[error("Verifier unavailable: {0}")]
    VerifierUnavailable(String),
    /// A bulletin with the same nonce has already been accepted.
    #[error("Duplicate vote")]
    DuplicateVote,
    #[error("Candidate '{0}' not found")]
    CandidateNotFound(String),
    #[error("Signer already registered with public key '{0}'")]
    SignerAlreadyExists(String),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = match self {
            Self::Db(_) => Status::InternalServerError,
            Self::InvalidSignature(_) | Self::SignerAlreadyExists(_) => Status::BadRequest,
            Self::VerifierUnavailable(_) => Status::BadGateway,
            Self::DuplicateVote => Status::Conflict,
            Self::CandidateNotFound(_) => Status::NotFound,
        };
        match status.class() {
            StatusClass::ServerError => error!("{self}"),
            _ => warn!("{self}"),
        }
        Err(status)
    }
}
