//! In-memory store with the same uniqueness contract as the Mongo indexes,
//! used to exercise the request pipeline without a live database.

use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::model::{bulletin::Bulletin, candidate::Candidate, id::Id, signer::Signer};

use super::{BulletinStore, CandidateStore, SignerStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    candidates: Vec<Candidate>,
    signers: Vec<Signer>,
    bulletins: Vec<Bulletin>,
}

#[rocket::async_trait]
impl CandidateStore for MemoryStore {
    async fn insert(&self, fullname: &str) -> Result<Candidate> {
        let candidate = Candidate::new(fullname);
        self.inner.lock().unwrap().candidates.push(candidate.clone());
        Ok(candidate)
    }

    async fn by_id(&self, id: Id) -> Result<Option<Candidate>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn all(&self) -> Result<Vec<Candidate>> {
        Ok(self.inner.lock().unwrap().candidates.clone())
    }
}

#[rocket::async_trait]
impl SignerStore for MemoryStore {
    async fn insert(&self, fullname: &str, public_key: &str) -> Result<Signer> {
        let mut inner = self.inner.lock().unwrap();
        if inner.signers.iter().any(|s| s.public_key == public_key) {
            return Err(Error::SignerAlreadyExists(public_key.to_string()));
        }
        let signer = Signer::new(fullname, public_key);
        inner.signers.push(signer.clone());
        Ok(signer)
    }

    async fn public_keys(&self) -> Result<Vec<String>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.signers.iter().map(|s| s.public_key.clone()).collect())
    }
}

#[rocket::async_trait]
impl BulletinStore for MemoryStore {
    async fn exists(&self, u_number: &str) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.bulletins.iter().any(|b| b.u_number == u_number))
    }

    async fn insert(&self, bulletin: Bulletin) -> Result<()> {
        // Check-and-insert under one lock, mirroring the unique index.
        let mut inner = self.inner.lock().unwrap();
        if inner.bulletins.iter().any(|b| b.u_number == bulletin.u_number) {
            return Err(Error::DuplicateVote);
        }
        inner.bulletins.push(bulletin);
        Ok(())
    }

    async fn count_for(&self, candidate_id: Id) -> Result<u64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .bulletins
            .iter()
            .filter(|b| b.candidate_id == candidate_id)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rocket::async_test]
    async fn bulletin_insert_enforces_nonce_uniqueness() {
        let store = MemoryStore::default();
        let candidate = CandidateStore::insert(&store, "Candidate").await.unwrap();

        BulletinStore::insert(&store, Bulletin::new("nonce", "sig-a", candidate.id))
            .await
            .unwrap();
        // Same nonce straight at the store, bypassing any pre-check.
        let err = BulletinStore::insert(&store, Bulletin::new("nonce", "sig-b", candidate.id))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateVote));
        assert_eq!(1, store.count_for(candidate.id).await.unwrap());
    }

    #[rocket::async_test]
    async fn signer_insert_enforces_key_uniqueness() {
        let store = MemoryStore::default();
        SignerStore::insert(&store, "First", "02abc").await.unwrap();

        let err = SignerStore::insert(&store, "Second", "02abc")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SignerAlreadyExists(_)));

        // A distinct key is fine.
        SignerStore::insert(&store, "Second", "03def").await.unwrap();
        assert_eq!(2, store.public_keys().await.unwrap().len());
    }
}
