//! The ballot submission pipeline: verify, dedup, resolve, persist.

use crate::error::{Error, Result};
use crate::model::bulletin::{Bulletin, BulletinSpec};
use crate::store::Stores;
use crate::verifier::{Verifier, VerifyRequest};

/// Turn a raw signed ballot into a verified, deduplicated, persisted vote.
///
/// Exactly one outbound verifier call, one existence check, and one insert;
/// nothing is persisted unless every prior step succeeded, and no retries
/// happen here. The nonce pre-check only fails fast: the storage unique
/// constraint is what keeps submission at-most-once when two ballots with
/// the same nonce race between check and insert.
pub async fn submit_ballot(
    verifier: &dyn Verifier,
    stores: &Stores,
    spec: BulletinSpec,
) -> Result<Bulletin> {
    let request = VerifyRequest {
        message: spec.candidate_id.to_string(),
        signature_b64: spec.signature_b64.clone(),
        ring: spec.ring,
        n: spec.n,
        m: spec.m,
    };
    let response = verifier.verify(&request).await?;
    if !response.ok {
        return Err(Error::InvalidSignature(
            response
                .error
                .unwrap_or_else(|| "verifier rejected the signature".to_string()),
        ));
    }
    let u_number = response
        .u_number
        .ok_or_else(|| Error::InvalidSignature("verifier response missing uNumber".to_string()))?;

    if stores.bulletins.exists(&u_number).await? {
        return Err(Error::DuplicateVote);
    }

    let candidate = stores
        .candidates
        .by_id(*spec.candidate_id)
        .await?
        .ok_or_else(|| Error::CandidateNotFound(spec.candidate_id.to_string()))?;

    let bulletin = Bulletin::new(u_number, spec.signature_b64, candidate.id);
    stores.bulletins.insert(bulletin.clone()).await?;
    Ok(bulletin)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::model::candidate::Candidate;
    use crate::model::id::Id;
    use crate::verifier::stub::{DownVerifier, EchoVerifier, RejectingVerifier};

    use super::*;

    fn spec_for(candidate_id: Id, signature: &str) -> BulletinSpec {
        BulletinSpec {
            candidate_id: candidate_id.into(),
            signature_b64: signature.to_string(),
            ring: vec!["02aa".to_string(), "02bb".to_string()],
            n: 2,
            m: 1,
        }
    }

    async fn stores_with_candidate() -> (Stores, Candidate) {
        let stores = Stores::in_memory();
        let candidate = stores.candidates.insert("Candidate").await.unwrap();
        (stores, candidate)
    }

    #[rocket::async_test]
    async fn accepted_ballot_is_persisted_verbatim() {
        let (stores, candidate) = stores_with_candidate().await;

        let bulletin = submit_ballot(&EchoVerifier, &stores, spec_for(candidate.id, "sig-1"))
            .await
            .unwrap();

        assert_eq!("sig-1", bulletin.raw_data);
        assert_eq!(candidate.id, bulletin.candidate_id);
        assert_eq!(1, stores.bulletins.count_for(candidate.id).await.unwrap());
    }

    #[rocket::async_test]
    async fn resubmission_is_a_duplicate_vote() {
        let (stores, candidate) = stores_with_candidate().await;

        submit_ballot(&EchoVerifier, &stores, spec_for(candidate.id, "sig-1"))
            .await
            .unwrap();
        let err = submit_ballot(&EchoVerifier, &stores, spec_for(candidate.id, "sig-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateVote));
        assert_eq!(1, stores.bulletins.count_for(candidate.id).await.unwrap());
    }

    #[rocket::async_test]
    async fn concurrent_duplicates_store_exactly_one_bulletin() {
        let (stores, candidate) = stores_with_candidate().await;
        let verifier: Arc<dyn Verifier> = Arc::new(EchoVerifier);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let stores = stores.clone();
            let verifier = verifier.clone();
            let spec = spec_for(candidate.id, "same-sig");
            handles.push(rocket::tokio::spawn(async move {
                submit_ballot(verifier.as_ref(), &stores, spec).await
            }));
        }

        let mut accepted = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(Error::DuplicateVote) => duplicates += 1,
                Err(err) => panic!("unexpected error: {err}"),
            }
        }

        assert_eq!(1, accepted);
        assert_eq!(15, duplicates);
        assert_eq!(1, stores.bulletins.count_for(candidate.id).await.unwrap());
    }

    #[rocket::async_test]
    async fn rejected_signature_stores_nothing() {
        let (stores, candidate) = stores_with_candidate().await;

        let err = submit_ballot(&RejectingVerifier, &stores, spec_for(candidate.id, "sig-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidSignature(_)));
        assert_eq!(0, stores.bulletins.count_for(candidate.id).await.unwrap());
    }

    #[rocket::async_test]
    async fn unknown_candidate_fails_even_with_valid_signature() {
        let (stores, candidate) = stores_with_candidate().await;

        let err = submit_ballot(&EchoVerifier, &stores, spec_for(Id::new(), "sig-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CandidateNotFound(_)));
        assert_eq!(0, stores.bulletins.count_for(candidate.id).await.unwrap());
    }

    #[rocket::async_test]
    async fn verifier_outage_is_not_an_invalid_signature() {
        let (stores, candidate) = stores_with_candidate().await;

        let err = submit_ballot(&DownVerifier, &stores, spec_for(candidate.id, "sig-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::VerifierUnavailable(_)));
        assert_eq!(0, stores.bulletins.count_for(candidate.id).await.unwrap());
    }
}
