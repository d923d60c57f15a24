//! Core orchestration for a post-quantum signature scheme derived from
//! the De Feo-Jao-Plut supersingular isogeny key exchange (SIDH).
//!
//! This crate implements the Sigma-protocol engine that repeats a
//! commit/challenge/response round many times and collapses it to a
//! non-interactive signature with Fiat-Shamir. The curve arithmetic
//! itself -- key generation, shared-secret computation, point tripling,
//! and the half-Pohlig-Hellman math behind psi(S) compression -- is not
//! implemented here: it is consumed through the [`prim::IsogenyPrimitives`]
//! trait, so this crate can drive any conforming isogeny backend.

pub mod batch;
pub mod challenge;
pub mod compress;
pub mod error;
pub mod key;
pub mod params;
pub mod pool;
pub mod prim;
pub mod session;
pub mod signature;
pub mod signer;
pub mod verifier;

#[cfg(test)]
pub mod testkit;

pub use batch::Batch;
pub use error::{PrimitiveError, SignError, VerifyError};
pub use key::{PrivateKey, PublicKey};
pub use params::CurveParams;
pub use signature::{CompressedPsiS, HashResp, ProjectivePoint, PsiSValue, Signature};
pub use signer::Signer;
pub use verifier::Verifier;
