//! The external ring-signature verifier, modelled as a pluggable capability
//! so the submission pipeline can be tested with controlled fakes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A signature-verification request, as understood by the external verifier.
/// A fixed struct rather than an ad-hoc map, so fields can't silently drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Canonical string form of the candidate being voted for.
    pub message: String,
    pub signature_b64: String,
    /// Ring of hex-encoded public keys, in signing order.
    pub ring: Vec<String>,
    pub n: i32,
    pub m: i32,
}

/// The verifier's answer. Only `ok == true` with a nonce present counts as a
/// valid signature; everything else is rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub u_number: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// External signature-verification capability.
#[rocket::async_trait]
pub trait Verifier: Send + Sync {
    /// One round trip to the verifier, no retries. Transport failures
    /// surface as `VerifierUnavailable`; whatever the verifier actually said
    /// comes back as a response, even when delivered with a non-2xx status.
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse>;
}

/// Production verifier client, talking HTTP + JSON with a hard deadline per
/// round trip.
pub struct HttpVerifier {
    client: reqwest::Client,
    url: String,
}

impl HttpVerifier {
    pub fn new(url: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[rocket::async_trait]
impl Verifier for HttpVerifier {
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|err| Error::VerifierUnavailable(err.to_string()))?;

        // The verifier reports malformed input as a 400 carrying the same
        // JSON body shape, so parse the body whatever the status was.
        response
            .json()
            .await
            .map_err(|err| Error::InvalidSignature(format!("malformed verifier response: {err}")))
    }
}
