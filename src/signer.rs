//! The Signer (spec §4.3): orchestrates the commit phase across
//! rounds, derives the Fiat-Shamir challenge, and assembles the
//! signature.

use crate::challenge;
use crate::compress;
use crate::error::{PrimitiveError, SignError};
use crate::key::{PrivateKey, PublicKey};
use crate::params::CurveParams;
use crate::pool;
use crate::prim::{keccak256, FieldBytes, IsogenyPrimitives};
use crate::session::SignSession;
use crate::signature::{CompressedPsiS, HashResp, ProjectivePoint, PsiSValue, Signature};
use ark_ff::{Field, PrimeField};
use rand::{rngs::StdRng, SeedableRng};

const LOG_TARGET: &str = "sidh_signature::signer";

struct RoundOutput<F: Field, S: PrimeField> {
    random: S,
    commitment1: F,
    commitment2: F,
    psi_s: PsiSValue<F, S>,
}

impl<F: Field, S: PrimeField> RoundOutput<F, S> {
    /// Placeholder for a round whose primitive call failed (spec §4.3
    /// step 5: "the round output slot is left in whatever partial state
    /// exists"). Zero is as reasonable a placeholder as any -- the
    /// round is malformed either way, and the caller is expected to
    /// retry with a fresh nonce source rather than trust its content.
    fn malformed(compressed: bool) -> Self {
        let psi_s = if compressed {
            PsiSValue::Compressed {
                scalars: CompressedPsiS {
                    a: S::zero(),
                    b: S::zero(),
                },
                bit: false,
            }
        } else {
            PsiSValue::Projective(ProjectivePoint::new(F::zero(), F::zero()))
        };
        RoundOutput {
            random: S::zero(),
            commitment1: F::zero(),
            commitment2: F::zero(),
            psi_s,
        }
    }
}

pub struct Signer<'p, F: Field, S: PrimeField, P: IsogenyPrimitives<F, S>> {
    params: &'p CurveParams<F, S>,
    primitives: &'p P,
}

impl<'p, F, S, P> Signer<'p, F, S, P>
where
    F: Field + FieldBytes,
    S: PrimeField,
    P: IsogenyPrimitives<F, S>,
{
    pub fn new(params: &'p CurveParams<F, S>, primitives: &'p P) -> Self {
        Self { params, primitives }
    }

    /// Produce a `NUM_ROUNDS`-round signature.
    ///
    /// `seed` drives per-round ephemeral scalar sampling: each round
    /// derives its own `StdRng::seed_from_u64(seed ^ round)` rather than
    /// sharing one RNG across threads, so the result is identical
    /// regardless of `workers` or claim order (spec §8
    /// "Worker-count independence").
    pub fn sign(
        &self,
        seed: u64,
        private_key: &PrivateKey<S>,
        // Accepted for parity with the external contract's declared
        // input surface (spec §4.3); unused because SecretAgreementB is
        // called with the round's TempPub rather than the long-term
        // public key -- see the Design Notes note on `sign_round` below.
        _public_key: &PublicKey<F>,
        workers: usize,
        batched: bool,
        compressed: bool,
    ) -> Result<Signature<F, S>, SignError> {
        let num_rounds = self.params.num_rounds;
        let session = SignSession::new(num_rounds, batched, compressed);

        let round_results: Vec<Result<RoundOutput<F, S>, PrimitiveError>> =
            pool::run_rounds(num_rounds, workers, |round| {
                self.sign_round(round, seed, private_key, &session, compressed)
            });

        // Spec §4.3 step 5 / §7: a primitive failure for one round does
        // not abort the call. It is logged and the round is left
        // malformed; the assembled signature is handed back regardless,
        // and the caller is expected to treat it as malformed and retry
        // with a fresh nonce source.
        let mut failed_rounds = 0usize;
        let rounds: Vec<RoundOutput<F, S>> = round_results
            .into_iter()
            .enumerate()
            .map(|(round, result)| {
                result.unwrap_or_else(|err| {
                    failed_rounds += 1;
                    tracing::error!(
                        target: LOG_TARGET,
                        round,
                        %err,
                        "signing round hit a primitive failure; round left malformed"
                    );
                    RoundOutput::malformed(compressed)
                })
            })
            .collect();

        if failed_rounds > 0 {
            tracing::error!(
                target: LOG_TARGET,
                failed_rounds,
                total_rounds = num_rounds,
                "signature assembled with malformed rounds; caller should retry with a fresh nonce source"
            );
        }

        let mut randoms = Vec::with_capacity(num_rounds);
        let mut commitments1 = Vec::with_capacity(num_rounds);
        let mut commitments2 = Vec::with_capacity(num_rounds);
        let mut psi_s = Vec::with_capacity(num_rounds);
        let mut hash_resp = Vec::with_capacity(num_rounds);

        for round in rounds {
            let random_hash = keccak256(&round.random.into_bigint().to_bytes_be());
            let response_hash = keccak256(&round.psi_s.to_be_bytes());
            hash_resp.push(HashResp {
                random_hash,
                response_hash,
            });
            randoms.push(round.random);
            commitments1.push(round.commitment1);
            commitments2.push(round.commitment2);
            psi_s.push(round.psi_s);
        }

        // The challenge is recomputed by the verifier; sign() need not
        // return it (spec §4.3 step 8), but computing it here keeps
        // this function's contract self-checking in debug builds.
        debug_assert_eq!(
            challenge::compute(&commitments1, &commitments2, &hash_resp, self.params.challenge_len())
                .len(),
            self.params.challenge_len()
        );

        Ok(Signature {
            randoms,
            commitments1,
            commitments2,
            hash_resp,
            psi_s,
            compressed,
        })
    }

    fn sign_round(
        &self,
        round: usize,
        seed: u64,
        private_key: &PrivateKey<S>,
        session: &SignSession<F>,
        compressed: bool,
    ) -> Result<RoundOutput<F, S>, PrimitiveError> {
        let mut rng = StdRng::seed_from_u64(seed ^ (round as u64));

        let mut random_scalar = S::zero();
        let mut temp_pub = [F::zero(); 3];
        self.primitives.key_gen_a(
            &mut rng,
            self.params,
            true,
            &mut random_scalar,
            &mut temp_pub,
            session.batch_a.as_ref(),
        )?;

        let commitment1 = temp_pub[0];

        // Per spec §4.3 step 3 (and the Design Notes' flagged oddity):
        // SecretAgreementB is called with the just-computed TempPub,
        // not the signer's long-term PublicKey -- follow the original
        // source's control flow as-is; see DESIGN.md for the
        // cryptographic-review note.
        let (commitment2, psi_s_point) = self.primitives.secret_agreement_b(
            Some(private_key.scalar()),
            &temp_pub,
            self.params,
            None,
            true,
            session.batch_b.as_ref(),
        )?;
        let psi_s_point: ProjectivePoint<F> = psi_s_point
            .expect("secret_agreement_b must return psi(S) when want_psi_s is true");

        let psi_s = if compressed {
            let (scalars, bit) = compress::compress(
                self.primitives,
                &psi_s_point,
                commitment1,
                self.params,
                session.compression_batch.as_ref(),
            )?;
            PsiSValue::Compressed { scalars, bit }
        } else {
            PsiSValue::Projective(psi_s_point)
        };

        Ok(RoundOutput {
            random: random_scalar,
            commitment1,
            commitment2,
            psi_s,
        })
    }
}

/// Convenience entry point mirroring the external interface's
/// `isogeny_sign` naming; delegates to [`Signer::sign`].
pub fn sign<F, S, P>(
    params: &CurveParams<F, S>,
    primitives: &P,
    seed: u64,
    private_key: &PrivateKey<S>,
    _public_key: &PublicKey<F>,
    workers: usize,
    batched: bool,
    compressed: bool,
) -> Result<Signature<F, S>, SignError>
where
    F: Field + FieldBytes,
    S: PrimeField,
    P: IsogenyPrimitives<F, S>,
{
    Signer::new(params, primitives).sign(seed, private_key, _public_key, workers, batched, compressed)
}
