use thiserror::Error;

/// An external primitive (key generation, secret agreement, psi(S)
/// compression) reported failure for one round. Grounded on
/// `shuffling/error.rs::ShuffleError`'s per-cause variant shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("key generation failed")]
    KeyGeneration,

    #[error("secret agreement failed")]
    SecretAgreement,

    /// Mirrors the original `CRYPTO_ERROR_DURING_TEST` surfaced by the
    /// half-Pohlig-Hellman solver inside psi(S) compression.
    #[error("half-Pohlig-Hellman did not converge during psi(S) compression")]
    CompressionFailed,

    #[error("psi(S) decompression failed")]
    DecompressionFailed,
}

/// Failures raised by [`crate::signer::Signer::sign`] that abort the
/// call outright.
///
/// Per spec §4.3 step 5 and §7, a primitive failure during signing is
/// logged and counted but does NOT abort the call: `sign` still returns
/// the assembled `Signature`, left malformed for whichever rounds hit a
/// primitive failure, exactly as `original_source/SIDH_signature.c`'s
/// `isogeny_sign` computes `errorCount` and then ignores it rather than
/// failing the call. This enum is reserved for the one failure class
/// spec §7 keeps as a whole-call abort: an internal counter going out
/// of range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("round counter exceeded NUM_ROUNDS: {0}")]
    InternalInvariantViolation(String),
}

/// Failures raised by [`crate::verifier::Verifier::verify`] that abort
/// the call outright, as distinct from a round simply failing its
/// check (which just makes the signature invalid, not an error).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("round counter exceeded NUM_ROUNDS: {0}")]
    InternalInvariantViolation(String),

    #[error("signature round count ({got}) does not match CurveParams::num_rounds ({expected})")]
    RoundCountMismatch { got: usize, expected: usize },
}

/// Why one round of verification failed. Collected per round instead
/// of the original `errorCount++`, then folded into the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundFailure {
    /// Bit-0 branch: `R_r`'s low bit was odd (insufficient 2-power order).
    OddRandom,
    /// Bit-0 branch: recomputed `A_r` did not match `Commitment1_r`.
    Commitment1Mismatch,
    /// Either branch: recomputed shared secret did not match `Commitment2_r`.
    Commitment2Mismatch,
    /// Bit-1 branch: decompressed/opened psi(S) tripled to infinity
    /// before `e_B - 1` steps.
    OrderTooSmall,
    /// An external primitive failed outright for this round.
    Primitive(PrimitiveError),
}
