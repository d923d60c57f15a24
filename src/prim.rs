//! External interfaces (spec §6): the curve/isogeny primitives this
//! crate treats as black boxes. A concrete SIDH library implements
//! [`IsogenyPrimitives`] over its own Fp² and scalar types; this crate
//! only ever calls through the trait.

use crate::batch::Batch;
use crate::error::PrimitiveError;
use crate::key::PublicKey;
use crate::params::CurveParams;
use crate::signature::{CompressedPsiS, ProjectivePoint};
use ark_ff::{Field, PrimeField};
use rand::RngCore;

/// Deterministic byte encoding of an Fp² element.
///
/// Spec §6 leaves "byte order of Fp² elements" to "the underlying
/// primitive's convention... out of scope here". Rather than assume a
/// canonical serialization for an arbitrary `Field`, the convention is
/// pushed onto the primitive implementer, who is the only party that
/// actually knows the field's representation.
pub trait FieldBytes {
    fn to_be_bytes(&self) -> Vec<u8>;
}

/// The curve/isogeny operations the core consumes as black boxes
/// (spec §6's external interface table).
pub trait IsogenyPrimitives<F, S>: Send + Sync
where
    F: Field + FieldBytes,
    S: PrimeField,
{
    /// Sample (if `gen_random`) or reuse the scalar already in
    /// `scalar`, then compute the SIDH-A public key triple of
    /// `E/⟨scalar·P_A + Q_A⟩` into `pubkey`. Uses `batch` for the
    /// final Fp² inversion when present.
    fn key_gen_a(
        &self,
        rng: &mut dyn RngCore,
        params: &CurveParams<F, S>,
        gen_random: bool,
        scalar: &mut S,
        pubkey: &mut [F; 3],
        batch: Option<&Batch<F>>,
    ) -> Result<(), PrimitiveError>;

    /// Long-term B-side key generation. Not exercised by the Signer or
    /// Verifier directly -- they only ever receive an already-generated
    /// `PrivateKey`/`PublicKey` pair -- but part of the external
    /// contract (spec §6) for completeness.
    fn key_gen_b(
        &self,
        rng: &mut dyn RngCore,
        params: &CurveParams<F, S>,
        scalar: &mut S,
        pubkey: &mut [F; 3],
    ) -> Result<(), PrimitiveError>;

    /// Standard SIDH shared secret from the A side.
    fn secret_agreement_a(
        &self,
        scalar: &S,
        their_pubkey: &PublicKey<F>,
        params: &CurveParams<F, S>,
        batch: Option<&Batch<F>>,
    ) -> Result<F, PrimitiveError>;

    /// Shared secret from the B side. When `scalar` is `None` the
    /// kernel is supplied explicitly via `explicit_kernel` (the
    /// verifier's bit-1 branch); when `want_psi_s` is set, the
    /// generator of the degree-ℓ_B^{e_B} kernel on the codomain is
    /// also returned.
    fn secret_agreement_b(
        &self,
        scalar: Option<&S>,
        their_pubkey: &[F; 3],
        params: &CurveParams<F, S>,
        explicit_kernel: Option<&ProjectivePoint<F>>,
        want_psi_s: bool,
        batch: Option<&Batch<F>>,
    ) -> Result<(F, Option<ProjectivePoint<F>>), PrimitiveError>;

    /// Triple a projective point on the Montgomery curve
    /// `y² = x³ + (A/C)x² + x`.
    fn x_tpl(&self, p: &ProjectivePoint<F>, a: F, c: F) -> ProjectivePoint<F>;

    /// Compress psi(S) relative to the fixed basis of `E/⟨R⟩[ℓ_B^{e_B}]`
    /// into a scalar pair plus a disambiguation bit (spec §4.5).
    fn compress_psi_s(
        &self,
        psi_s: &ProjectivePoint<F>,
        commitment1: F,
        params: &CurveParams<F, S>,
        batch: Option<&Batch<F>>,
    ) -> Result<(CompressedPsiS<S>, bool), PrimitiveError>;

    /// Reconstruct a point equivalent to the original psi(S), up to the
    /// ambiguity the disambiguation bit resolves.
    fn decompress_psi_s(
        &self,
        compressed: &CompressedPsiS<S>,
        bit: bool,
        commitment1: F,
        params: &CurveParams<F, S>,
        batch: Option<&Batch<F>>,
    ) -> Result<ProjectivePoint<F>, PrimitiveError>;
}

/// Keccak256, fixed 32-byte output. Owned by this crate via `sha3`
/// rather than treated as a black box: the external-interface table
/// names `Keccak(...)` as a primitive the core calls directly, and
/// `original_source/SIDH_signature.c` calls `keccak(...)` the same way
/// rather than hiding it behind a pluggable trait.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    use sha3::{Digest, Keccak256};
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Variable-length Keccak (SHAKE256), used for the challenge hash whose
/// length is `NUM_ROUNDS / 8` bytes.
pub fn keccak_xof(data: &[u8], out_len: usize) -> Vec<u8> {
    use sha3::digest::{ExtendableOutput, Update, XofReader};
    use sha3::Shake256;
    let mut hasher = Shake256::default();
    hasher.update(data);
    let mut reader = hasher.finalize_xof();
    let mut out = vec![0u8; out_len];
    reader.read(&mut out);
    out
}
