use std::ops::Deref;

use mongodb::{
    bson::doc,
    error::{Error as DbError, ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use rocket::futures::TryStreamExt;

use crate::error::{Error, Result};
use crate::model::{bulletin::Bulletin, candidate::Candidate, id::Id, signer::Signer};

use super::{BulletinStore, CandidateStore, SignerStore};

/// A type that can be directly inserted/read to/from the database.
pub trait MongoCollection {
    /// The name of the collection.
    const NAME: &'static str;
}

impl MongoCollection for Candidate {
    const NAME: &'static str = "candidates";
}
impl MongoCollection for Signer {
    const NAME: &'static str = "signers";
}
impl MongoCollection for Bulletin {
    const NAME: &'static str = "bulletins";
}

/// A database collection of the given type.
pub struct Coll<T>(Collection<T>);

impl<T> Coll<T>
where
    T: MongoCollection,
{
    /// Get a handle on this collection in the given database.
    pub fn from_db(db: &Database) -> Self {
        Self(db.collection(T::NAME))
    }
}

// `derive(Clone)` would demand `T: Clone`, which we don't need.
impl<T> Clone for Coll<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for Coll<T> {
    type Target = Collection<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Ensure that all the required unique indexes exist on the given database.
///
/// This operation is idempotent.
pub async fn ensure_indexes_exist(db: &Database) -> Result<()> {
    debug!("Ensuring collection indexes exist");

    let unique = IndexOptions::builder().unique(true).build();

    let signer_index = IndexModel::builder()
        .keys(doc! {"public_key": 1})
        .options(unique.clone())
        .build();
    Coll::<Signer>::from_db(db)
        .create_index(signer_index, None)
        .await?;

    let bulletin_index = IndexModel::builder()
        .keys(doc! {"u_number": 1})
        .options(unique)
        .build();
    Coll::<Bulletin>::from_db(db)
        .create_index(bulletin_index, None)
        .await?;

    Ok(())
}

// The mongodb crate doesn't provide error code constants.
const DUPLICATE_KEY: i32 = 11000;

/// Return true if the given error is a unique-index write violation.
fn is_duplicate_key_error(err: &DbError) -> bool {
    if let ErrorKind::Write(WriteFailure::WriteError(ref e)) = *err.kind {
        return e.code == DUPLICATE_KEY;
    }
    false
}

/// Mongo-backed implementation of all three registries.
pub struct MongoStore {
    candidates: Coll<Candidate>,
    signers: Coll<Signer>,
    bulletins: Coll<Bulletin>,
}

impl MongoStore {
    pub fn from_db(db: &Database) -> Self {
        Self {
            candidates: Coll::from_db(db),
            signers: Coll::from_db(db),
            bulletins: Coll::from_db(db),
        }
    }
}

#[rocket::async_trait]
impl CandidateStore for MongoStore {
    async fn insert(&self, fullname: &str) -> Result<Candidate> {
        let candidate = Candidate::new(fullname);
        self.candidates.insert_one(&candidate, None).await?;
        Ok(candidate)
    }

    async fn by_id(&self, id: Id) -> Result<Option<Candidate>> {
        Ok(self.candidates.find_one(id.as_doc(), None).await?)
    }

    async fn all(&self) -> Result<Vec<Candidate>> {
        Ok(self.candidates.find(None, None).await?.try_collect().await?)
    }
}

#[rocket::async_trait]
impl SignerStore for MongoStore {
    async fn insert(&self, fullname: &str, public_key: &str) -> Result<Signer> {
        // Fail fast on a known key; the unique index still catches races.
        let filter = doc! { "public_key": public_key };
        if self.signers.find_one(filter, None).await?.is_some() {
            return Err(Error::SignerAlreadyExists(public_key.to_string()));
        }

        let signer = Signer::new(fullname, public_key);
        self.signers
            .insert_one(&signer, None)
            .await
            .map_err(|err| {
                if is_duplicate_key_error(&err) {
                    Error::SignerAlreadyExists(public_key.to_string())
                } else {
                    err.into()
                }
            })?;
        Ok(signer)
    }

    async fn public_keys(&self) -> Result<Vec<String>> {
        let signers: Vec<Signer> = self.signers.find(None, None).await?.try_collect().await?;
        Ok(signers.into_iter().map(|s| s.public_key).collect())
    }
}

#[rocket::async_trait]
impl BulletinStore for MongoStore {
    async fn exists(&self, u_number: &str) -> Result<bool> {
        let filter = doc! { "u_number": u_number };
        Ok(self.bulletins.find_one(filter, None).await?.is_some())
    }

    async fn insert(&self, bulletin: Bulletin) -> Result<()> {
        self.bulletins
            .insert_one(&bulletin, None)
            .await
            .map_err(|err| {
                if is_duplicate_key_error(&err) {
                    Error::DuplicateVote
                } else {
                    err.into()
                }
            })?;
        Ok(())
    }

    async fn count_for(&self, candidate_id: Id) -> Result<u64> {
        let filter = doc! { "candidate_id": *candidate_id };
        Ok(self.bulletins.count_documents(filter, None).await?)
    }
}
