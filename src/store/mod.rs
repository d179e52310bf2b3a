//! Persistence contracts for the three registries, plus their MongoDB
//! implementation. Routes and the submission pipeline only ever see the
//! traits, so tests can run against [`memory::MemoryStore`] with the same
//! uniqueness guarantees the Mongo indexes provide.

use std::sync::Arc;

use crate::error::Result;
use crate::model::{bulletin::Bulletin, candidate::Candidate, id::Id, signer::Signer};

#[cfg(test)]
pub mod memory;
pub mod mongo;

/// The pool of candidates eligible to receive votes.
#[rocket::async_trait]
pub trait CandidateStore: Send + Sync {
    /// Create and persist a new candidate with the given name.
    async fn insert(&self, fullname: &str) -> Result<Candidate>;

    async fn by_id(&self, id: Id) -> Result<Option<Candidate>>;

    /// All candidates, in registration order.
    async fn all(&self) -> Result<Vec<Candidate>>;
}

/// The pool of registered signers.
#[rocket::async_trait]
pub trait SignerStore: Send + Sync {
    /// Create and persist a new signer. Fails with
    /// [`Error::SignerAlreadyExists`](crate::error::Error::SignerAlreadyExists)
    /// if the public key is already taken.
    async fn insert(&self, fullname: &str, public_key: &str) -> Result<Signer>;

    /// Public keys of every registered signer, in registration order.
    async fn public_keys(&self) -> Result<Vec<String>>;
}

/// Accepted ballots, keyed by the verifier-issued nonce.
#[rocket::async_trait]
pub trait BulletinStore: Send + Sync {
    /// Whether a bulletin with this nonce has already been accepted.
    async fn exists(&self, u_number: &str) -> Result<bool>;

    /// Persist a bulletin. Fails with
    /// [`Error::DuplicateVote`](crate::error::Error::DuplicateVote) if the
    /// nonce is already present; this constraint, not [`Self::exists`], is
    /// what makes submission at-most-once.
    async fn insert(&self, bulletin: Bulletin) -> Result<()>;

    /// Number of bulletins cast for the given candidate.
    async fn count_for(&self, candidate_id: Id) -> Result<u64>;
}

/// Handles on the persistence layer, one per registry. Lives in managed
/// state; cloning is cheap.
#[derive(Clone)]
pub struct Stores {
    pub candidates: Arc<dyn CandidateStore>,
    pub signers: Arc<dyn SignerStore>,
    pub bulletins: Arc<dyn BulletinStore>,
}

impl Stores {
    /// Store handles backed by the given MongoDB database.
    pub fn mongo(db: &mongodb::Database) -> Self {
        let store = Arc::new(mongo::MongoStore::from_db(db));
        Self {
            candidates: store.clone(),
            signers: store.clone(),
            bulletins: store,
        }
    }

    /// Store handles backed by a fresh in-memory store.
    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            candidates: store.clone(),
            signers: store.clone(),
            bulletins: store,
        }
    }
}
