use serde::{Deserialize, Serialize};

use crate::model::id::{ApiId, Id};

/// A candidate eligible to receive votes. Immutable once registered; the
/// vote count is derived from the bulletins that reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: Id,
    pub fullname: String,
}

impl Candidate {
    pub fn new(fullname: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            fullname: fullname.into(),
        }
    }
}

/// Request body for registering a candidate. Names need not be unique.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateSpec {
    pub fullname: String,
}

/// API view of a candidate.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateDescription {
    pub id: ApiId,
    pub fullname: String,
}

impl From<Candidate> for CandidateDescription {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id.into(),
            fullname: candidate.fullname,
        }
    }
}

/// A candidate together with its tallied vote count.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateResult {
    pub id: ApiId,
    pub fullname: String,
    pub votes: u64,
}
