use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Sentinel exponent meaning "as large as the pool allows".
pub const MAX_RING: i64 = -1;

/// An anonymity set drawn from the signer pool. The verifier cannot tell
/// which member of the ring produced a signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub public_keys: Vec<String>,
    pub ring_size: usize,
    pub exp: u32,
    pub base: u32,
}

impl Ring {
    /// Build a ring from the given pool of public keys.
    ///
    /// The pool is shuffled uniformly (thread RNG, no reproducible seed) and
    /// the first `count` keys form the ring, where `count` is chosen by
    /// [`ring_dimensions`]. The caller's copy of the pool is consumed; the
    /// persisted signer ordering is never touched.
    pub fn select(mut pool: Vec<String>, size_exponent: i64) -> Self {
        let (count, exp) = ring_dimensions(pool.len(), size_exponent);
        pool.shuffle(&mut rand::thread_rng());
        pool.truncate(count);
        Ring {
            public_keys: pool,
            ring_size: count,
            exp,
            base: 2,
        }
    }
}

/// Largest power-of-two ring size that fits both the requested exponent and
/// the available pool, together with its exponent.
///
/// Ring-signature schemes want power-of-two anonymity sets, so the returned
/// size is always `2^exp`, never exceeding `available` or the request. With
/// an empty pool there is no anonymity set at all: `(0, 0)`. A request below
/// one key is clamped to one.
pub fn ring_dimensions(available: usize, size_exponent: i64) -> (usize, u32) {
    if available == 0 {
        return (0, 0);
    }
    let requested = match size_exponent {
        MAX_RING => available,
        e if e < 1 => 1,
        e if e >= usize::BITS as i64 => usize::MAX,
        e => 1 << e,
    };
    let mut count = 1;
    let mut exp = 0;
    while count * 2 <= requested && count * 2 <= available {
        count *= 2;
        exp += 1;
    }
    (count, exp)
}
