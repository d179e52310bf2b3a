use serde::{Deserialize, Serialize};

use crate::model::id::Id;

/// A registered key holder, eligible to appear in anonymity rings.
///
/// Signers are never linked to bulletins: once a ballot is cast, nothing in
/// the data model ties it back to the signer that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signer {
    #[serde(rename = "_id")]
    pub id: Id,
    pub fullname: String,
    /// Compressed public key, hex-encoded. Globally unique.
    pub public_key: String,
}

impl Signer {
    pub fn new(fullname: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            fullname: fullname.into(),
            public_key: public_key.into(),
        }
    }
}

/// Request body for registering a signer.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerSpec {
    pub full_name: String,
    pub public_key: String,
}
