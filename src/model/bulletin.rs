use serde::{Deserialize, Serialize};

use crate::model::id::{ApiId, Id};

/// A persisted, verified, deduplicated vote record. Carries the candidate it
/// was cast for but deliberately no link to the signer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bulletin {
    #[serde(rename = "_id")]
    pub id: Id,
    /// Verifier-derived nonce, unique per signature instance. This is the
    /// idempotency key: a signer re-submitting always re-derives the same
    /// value.
    pub u_number: String,
    /// The submitted base64 signature, stored verbatim for audit.
    pub raw_data: String,
    pub candidate_id: Id,
}

impl Bulletin {
    pub fn new(
        u_number: impl Into<String>,
        raw_data: impl Into<String>,
        candidate_id: Id,
    ) -> Self {
        Self {
            id: Id::new(),
            u_number: u_number.into(),
            raw_data: raw_data.into(),
            candidate_id,
        }
    }
}

/// Request body for submitting a ballot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletinSpec {
    pub candidate_id: ApiId,
    /// base64(keyImage || rawSig), passed through to the verifier untouched.
    pub signature_b64: String,
    /// The ring of public keys used when signing, in signing order.
    pub ring: Vec<String>,
    pub n: i32,
    pub m: i32,
}
