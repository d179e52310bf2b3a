pub mod bulletin;
pub mod candidate;
pub mod id;
pub mod ring;
pub mod signer;
