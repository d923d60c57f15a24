//! The Verifier (spec §4.4): recomputes the challenge, dispatches
//! per-round verification that branches on the challenge bit, and
//! folds the per-round outcomes into a verdict.

use crate::compress;
use crate::error::{RoundFailure, VerifyError};
use crate::key::PublicKey;
use crate::params::CurveParams;
use crate::pool;
use crate::prim::{FieldBytes, IsogenyPrimitives};
use crate::session::VerifySession;
use crate::signature::{ProjectivePoint, PsiSValue, Signature};
use ark_ff::{Field, PrimeField};

const LOG_TARGET: &str = "sidh_signature::verifier";

pub struct Verifier<'p, F: Field, S: PrimeField, P: IsogenyPrimitives<F, S>> {
    params: &'p CurveParams<F, S>,
    primitives: &'p P,
}

impl<'p, F, S, P> Verifier<'p, F, S, P>
where
    F: Field + FieldBytes,
    S: PrimeField,
    P: IsogenyPrimitives<F, S>,
{
    pub fn new(params: &'p CurveParams<F, S>, primitives: &'p P) -> Self {
        Self { params, primitives }
    }

    /// `Ok(true)` iff every round's branch passed; `Ok(false)` if at
    /// least one round failed its check (tamper detected, or a
    /// legitimately malformed signature); `Err` only for a structural
    /// mismatch that makes verification meaningless (e.g. a signature
    /// whose round count does not match `params.num_rounds`).
    pub fn verify(
        &self,
        public_key: &PublicKey<F>,
        sig: &Signature<F, S>,
        workers: usize,
        batched: bool,
    ) -> Result<bool, VerifyError> {
        if sig.num_rounds() != self.params.num_rounds {
            return Err(VerifyError::RoundCountMismatch {
                got: sig.num_rounds(),
                expected: self.params.num_rounds,
            });
        }

        let session = VerifySession::new(
            self.params,
            &sig.commitments1,
            &sig.commitments2,
            &sig.hash_resp,
            batched,
            sig.compressed,
        );

        let outcomes: Vec<Result<(), RoundFailure>> =
            pool::run_rounds(self.params.num_rounds, workers, |round| {
                self.verify_round(round, public_key, sig, &session)
            });

        let failures: Vec<(usize, &RoundFailure)> = outcomes
            .iter()
            .enumerate()
            .filter_map(|(r, res)| res.as_ref().err().map(|e| (r, e)))
            .collect();

        if !failures.is_empty() {
            tracing::warn!(
                target: LOG_TARGET,
                rounds_failed = failures.len(),
                first_round = failures[0].0,
                "signature rejected"
            );
        }

        Ok(failures.is_empty())
    }

    fn verify_round(
        &self,
        round: usize,
        public_key: &PublicKey<F>,
        sig: &Signature<F, S>,
        session: &VerifySession<F>,
    ) -> Result<(), RoundFailure> {
        if session.challenge_bit(round) {
            self.verify_bit_one(round, public_key, sig, session)
        } else {
            self.verify_bit_zero(round, public_key, sig, session)
        }
    }

    /// `R_r` is the opened response: recompute `E -> E/⟨R_r⟩` and the
    /// A-side shared secret, and check both against the commitments.
    fn verify_bit_zero(
        &self,
        round: usize,
        public_key: &PublicKey<F>,
        sig: &Signature<F, S>,
        session: &VerifySession<F>,
    ) -> Result<(), RoundFailure> {
        let random = &sig.randoms[round];

        if is_odd_low_bit(random) {
            return Err(RoundFailure::OddRandom);
        }

        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let mut scalar = *random;
        let mut temp_pub = [F::zero(); 3];
        self.primitives
            .key_gen_a(
                &mut rng,
                self.params,
                false,
                &mut scalar,
                &mut temp_pub,
                session.batch_a.as_ref(),
            )
            .map_err(RoundFailure::Primitive)?;

        if temp_pub[0] != sig.commitments1[round] {
            return Err(RoundFailure::Commitment1Mismatch);
        }

        let shared_secret = self
            .primitives
            .secret_agreement_a(random, public_key, self.params, session.batch_b.as_ref())
            .map_err(RoundFailure::Primitive)?;

        if shared_secret != sig.commitments2[round] {
            return Err(RoundFailure::Commitment2Mismatch);
        }

        Ok(())
    }

    /// psi(S)_r is the opened response: check its order, then recompute
    /// the B-side shared secret with psi(S) supplied as the explicit
    /// kernel generator.
    fn verify_bit_one(
        &self,
        round: usize,
        _public_key: &PublicKey<F>,
        sig: &Signature<F, S>,
        session: &VerifySession<F>,
    ) -> Result<(), RoundFailure> {
        let commitment1 = sig.commitments1[round];

        let opened: ProjectivePoint<F> = match &sig.psi_s[round] {
            PsiSValue::Compressed { scalars, bit } => compress::decompress(
                self.primitives,
                scalars,
                *bit,
                commitment1,
                self.params,
                session.decompression_batch.as_ref(),
            )
            .map_err(RoundFailure::Primitive)?,
            PsiSValue::Projective(p) => *p,
        };

        let mut triple = opened;
        for _ in 0..self.params.order_check_steps() {
            triple = self
                .primitives
                .x_tpl(&triple, commitment1, self.params.montgomery_c);
            if triple.is_identity() {
                return Err(RoundFailure::OrderTooSmall);
            }
        }

        // Commitment1 re-serves as the public key input on the psi
        // side: the codomain curve's A-coefficient, affine-to-Montgomery
        // per spec §4.4's bit-1 branch.
        let temp_pub = [commitment1, F::zero(), F::zero()];

        let (shared_secret, _) = self
            .primitives
            .secret_agreement_b(
                None,
                &temp_pub,
                self.params,
                Some(&opened),
                false,
                session.batch_c.as_ref(),
            )
            .map_err(RoundFailure::Primitive)?;

        if shared_secret != sig.commitments2[round] {
            return Err(RoundFailure::Commitment2Mismatch);
        }

        Ok(())
    }
}

/// Spec §4.4: "lowest byte of R_r must be even" -- the least
/// significant byte of the little-endian scalar representation,
/// matching the original's `Randoms[r][0] % 2` check.
fn is_odd_low_bit<S: PrimeField>(scalar: &S) -> bool {
    scalar
        .into_bigint()
        .to_bytes_le()
        .first()
        .copied()
        .unwrap_or(0)
        % 2
        == 1
}

/// Convenience entry point mirroring the external interface's
/// `isogeny_verify` naming; delegates to [`Verifier::verify`].
pub fn verify<F, S, P>(
    params: &CurveParams<F, S>,
    primitives: &P,
    public_key: &PublicKey<F>,
    sig: &Signature<F, S>,
    workers: usize,
    batched: bool,
) -> Result<bool, VerifyError>
where
    F: Field + FieldBytes,
    S: PrimeField,
    P: IsogenyPrimitives<F, S>,
{
    Verifier::new(params, primitives).verify(public_key, sig, workers, batched)
}
