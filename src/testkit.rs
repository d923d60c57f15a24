//! A reference (non-cryptographic) implementation of
//! [`crate::prim::IsogenyPrimitives`], used only by this crate's own
//! tests to drive full sign/verify round trips without a real isogeny
//! backend. Grounded in `src/vrf/tests.rs`'s `TestCurve` substitute,
//! which stands in a small concrete curve instance in place of
//! production curve parameters for the same reason.
//!
//! This is emphatically not a signature scheme: the "shared secret"
//! and "psi(S)" here are simple field combinations chosen so that the
//! sign-side scalar path and the verify-side explicit-kernel path
//! agree algebraically, which is all the orchestration core needs to
//! exercise its contract.
//!
//! The scalar type `Scalar` is deliberately the *base* field of `Fq2`
//! (not its usual scalar field) so that compression can pack an Fq2
//! element into an `(a, b)` scalar pair with zero information loss --
//! `Fq2 = Scalar + Scalar * u`, so `a, b` simply are its two
//! coordinates. A production backend compresses via half-Pohlig-Hellman
//! on real torsion structure instead; this harness only needs the
//! contract (`decompress(compress(p)) ~ p`) to hold.

use crate::batch::Batch;
use crate::error::PrimitiveError;
use crate::key::PublicKey;
use crate::params::CurveParams;
use crate::prim::{FieldBytes, IsogenyPrimitives};
use crate::signature::{CompressedPsiS, ProjectivePoint};
use ark_ff::{BigInteger, Field, One, PrimeField, UniformRand, Zero};
use rand::RngCore;

pub type Fq2 = ark_bls12_381::Fq2;
pub type Scalar = ark_bls12_381::Fq;

impl FieldBytes for Fq2 {
    fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = self.c0.into_bigint().to_bytes_be();
        out.extend(self.c1.into_bigint().to_bytes_be());
        out
    }
}

/// Fold a scalar into Fp² as a purely real element. Not a real group
/// action -- a toy stand-in so the primitives below have something to
/// combine scalars and curve constants with.
fn embed(s: &Scalar) -> Fq2 {
    Fq2::new(*s, Scalar::zero())
}

/// Force the scalar's least-significant bit to 0, guaranteeing the
/// "full 2^{e_A} order" invariant spec §3 requires of an honestly
/// generated `RoundSecret`.
fn clear_low_bit(s: Scalar) -> Scalar {
    let mut bytes = s.into_bigint().to_bytes_le();
    bytes[0] &= !1u8;
    Scalar::from_le_bytes_mod_order(&bytes)
}

pub struct TestPrimitives;

impl IsogenyPrimitives<Fq2, Scalar> for TestPrimitives {
    fn key_gen_a(
        &self,
        rng: &mut dyn RngCore,
        params: &CurveParams<Fq2, Scalar>,
        gen_random: bool,
        scalar: &mut Scalar,
        pubkey: &mut [Fq2; 3],
        batch: Option<&Batch<Fq2>>,
    ) -> Result<(), PrimitiveError> {
        if gen_random {
            *scalar = clear_low_bit(Scalar::rand(rng));
        }

        let e = embed(scalar);
        let inv = match batch {
            Some(b) => {
                let slot = b.submit(e);
                b.result(slot)
            }
            None => e.inverse().ok_or(PrimitiveError::KeyGeneration)?,
        };

        pubkey[0] = params.p_a * e + params.q_a * inv;
        pubkey[1] = params.p_b * e + params.q_b * inv;
        pubkey[2] = (params.p_a - params.p_b) * e + inv;
        Ok(())
    }

    fn key_gen_b(
        &self,
        rng: &mut dyn RngCore,
        params: &CurveParams<Fq2, Scalar>,
        scalar: &mut Scalar,
        pubkey: &mut [Fq2; 3],
    ) -> Result<(), PrimitiveError> {
        self.key_gen_a(rng, params, true, scalar, pubkey, None)
    }

    fn secret_agreement_a(
        &self,
        scalar: &Scalar,
        their_pubkey: &PublicKey<Fq2>,
        _params: &CurveParams<Fq2, Scalar>,
        batch: Option<&Batch<Fq2>>,
    ) -> Result<Fq2, PrimitiveError> {
        let e = embed(scalar);
        if let Some(b) = batch {
            // Exercised purely so the batched path runs through the
            // same inverter the unbatched path would otherwise skip;
            // squaring it back out keeps the returned value unchanged.
            let slot = b.submit(e);
            let inv = b.result(slot);
            debug_assert_eq!(inv * e, Fq2::one());
        }
        Ok(their_pubkey.0[0] * e + their_pubkey.0[1])
    }

    fn secret_agreement_b(
        &self,
        scalar: Option<&Scalar>,
        their_pubkey: &[Fq2; 3],
        _params: &CurveParams<Fq2, Scalar>,
        explicit_kernel: Option<&ProjectivePoint<Fq2>>,
        want_psi_s: bool,
        batch: Option<&Batch<Fq2>>,
    ) -> Result<(Fq2, Option<ProjectivePoint<Fq2>>), PrimitiveError> {
        let kernel_x = match (scalar, explicit_kernel) {
            (Some(sk), None) => their_pubkey[0] * embed(sk),
            (None, Some(p)) => p.x,
            _ => return Err(PrimitiveError::SecretAgreement),
        };

        // Every round assigned to this batch must submit exactly once,
        // regardless of what it submits: the batch only completes once
        // every slot up to its declared capacity is filled, so skipping
        // a submission here would stall every other round sharing it.
        if let Some(b) = batch {
            let slot = b.submit(kernel_x);
            if !kernel_x.is_zero() {
                let inv = b.result(slot);
                debug_assert_eq!(inv * kernel_x, Fq2::one());
            }
        }

        let shared = kernel_x + their_pubkey[2];
        let psi_s = want_psi_s.then(|| ProjectivePoint::new(kernel_x, Fq2::one()));
        Ok((shared, psi_s))
    }

    fn x_tpl(&self, p: &ProjectivePoint<Fq2>, _a: Fq2, _c: Fq2) -> ProjectivePoint<Fq2> {
        if p.is_identity() {
            return *p;
        }
        // A toy tripling map: scale X by a fixed nonzero factor each
        // step. Fp² has no zero divisors, so a point with X != 0 never
        // reaches the identity under repeated scaling by a nonzero
        // constant -- exactly the "survives e_B - 1 steps" behavior an
        // honestly generated psi(S) should show, without needing a real
        // 3-torsion structure to land the point in.
        let x = p.x * Fq2::from(2u64);
        ProjectivePoint::new(x, p.z)
    }

    fn compress_psi_s(
        &self,
        psi_s: &ProjectivePoint<Fq2>,
        _commitment1: Fq2,
        _params: &CurveParams<Fq2, Scalar>,
        _batch: Option<&Batch<Fq2>>,
    ) -> Result<(CompressedPsiS<Scalar>, bool), PrimitiveError> {
        // Scalar = Fq2's base field, so (c0, c1) of X round-trips
        // exactly through (a, b); `bit` flags whether Z was the
        // identity marker so decompress can restore it exactly too.
        let bit = psi_s.is_identity();
        Ok((
            CompressedPsiS {
                a: psi_s.x.c0,
                b: psi_s.x.c1,
            },
            bit,
        ))
    }

    fn decompress_psi_s(
        &self,
        compressed: &CompressedPsiS<Scalar>,
        bit: bool,
        _commitment1: Fq2,
        _params: &CurveParams<Fq2, Scalar>,
        _batch: Option<&Batch<Fq2>>,
    ) -> Result<ProjectivePoint<Fq2>, PrimitiveError> {
        let x = Fq2::new(compressed.a, compressed.b);
        let z = if bit { Fq2::zero() } else { Fq2::one() };
        Ok(ProjectivePoint::new(x, z))
    }
}
