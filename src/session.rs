//! `SignSession`/`VerifySession` (Design Notes §9): the batches for one
//! sign or verify call, owned by a value created per call and dropped
//! at the end of it, instead of the original's process-wide mutable
//! batch pointers. This also eliminates the original's reentrancy
//! hazard of two concurrent sign/verify calls sharing one set of
//! globals.

use crate::batch::Batch;
use crate::challenge;
use crate::params::CurveParams;
use crate::signature::{HashResp, Signature};
use ark_ff::{Field, PrimeField};

use crate::prim::FieldBytes;

/// Batches backing one `Signer::sign` call. `None` when `batched` is
/// false: the primitive then performs its own, unbatched inversion.
pub struct SignSession<F: Field> {
    pub batch_a: Option<Batch<F>>,
    pub batch_b: Option<Batch<F>>,
    pub compression_batch: Option<Batch<F>>,
}

impl<F: Field> SignSession<F> {
    pub fn new(num_rounds: usize, batched: bool, compressed: bool) -> Self {
        if !batched {
            return Self {
                batch_a: None,
                batch_b: None,
                compression_batch: None,
            };
        }
        Self {
            batch_a: Some(Batch::new(num_rounds)),
            batch_b: Some(Batch::new(num_rounds)),
            compression_batch: if compressed {
                Some(Batch::new(num_rounds))
            } else {
                None
            },
        }
    }
}

/// Batches backing one `Verifier::verify` call, sized from the
/// challenge (spec §4.1 "Resizing policy"): `batch_a`/`batch_b` serve
/// the bit-0 rounds, `batch_c` the bit-1 rounds, and `decompression`
/// the bit-1 rounds again when the signature is compressed.
pub struct VerifySession<F: Field> {
    pub c_hash: Vec<u8>,
    pub zero_rounds: usize,
    pub one_rounds: usize,
    pub batch_a: Option<Batch<F>>,
    pub batch_b: Option<Batch<F>>,
    pub batch_c: Option<Batch<F>>,
    pub decompression_batch: Option<Batch<F>>,
}

impl<F: Field + FieldBytes> VerifySession<F> {
    pub fn new<S: PrimeField>(
        params: &CurveParams<F, S>,
        commitments1: &[F],
        commitments2: &[F],
        hash_resp: &[HashResp],
        batched: bool,
        compressed: bool,
    ) -> Self {
        let c_hash = challenge::compute(commitments1, commitments2, hash_resp, params.challenge_len());
        let (zero_rounds, one_rounds) = challenge::count_bits(&c_hash, params.num_rounds);

        if !batched {
            return Self {
                c_hash,
                zero_rounds,
                one_rounds,
                batch_a: None,
                batch_b: None,
                batch_c: None,
                decompression_batch: None,
            };
        }

        Self {
            c_hash,
            zero_rounds,
            one_rounds,
            batch_a: Some(Batch::new(zero_rounds)),
            batch_b: Some(Batch::new(zero_rounds)),
            batch_c: Some(Batch::new(one_rounds)),
            decompression_batch: if compressed {
                Some(Batch::new(one_rounds))
            } else {
                None
            },
        }
    }

    pub fn challenge_bit(&self, round: usize) -> bool {
        challenge::bit(&self.c_hash, round)
    }
}

/// Recompute the same `cHash` from a finished `Signature`, for callers
/// outside the verifier (e.g. tests asserting determinism against a
/// signer-side recomputation).
pub fn recompute_challenge<F, S>(params: &CurveParams<F, S>, sig: &Signature<F, S>) -> Vec<u8>
where
    F: Field + FieldBytes,
    S: PrimeField,
{
    challenge::compute(
        &sig.commitments1,
        &sig.commitments2,
        &sig.hash_resp,
        params.challenge_len(),
    )
}
