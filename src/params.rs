use ark_ff::{Field, PrimeField};
use std::marker::PhantomData;

/// Curve constants shared by every round of a sign or verify call.
///
/// Everything here is opaque to the core: base points, the Montgomery
/// constant, and the torsion exponents are passed straight through to
/// the [`crate::prim::IsogenyPrimitives`] implementation. The core only
/// reads `num_rounds` (to size the challenge and dispatch work) and
/// `e_b` (to bound the psi(S) order check).
#[derive(Clone, Debug)]
pub struct CurveParams<F: Field, S: PrimeField> {
    /// A-side basis points, as passed to `KeyGenA`/`SecretAgreementA`.
    pub p_a: F,
    pub q_a: F,
    /// B-side basis points, as passed to `KeyGenB`/`SecretAgreementB`.
    pub p_b: F,
    pub q_b: F,
    /// Montgomery coefficient `C` of the base curve.
    pub montgomery_c: F,
    /// Cofactor of the curve order; opaque to the core.
    pub cofactor: u64,
    /// 3-torsion exponent e_B: psi(S) must have order ℓ_B^e_B.
    pub e_b: u32,
    /// Number of Sigma-protocol rounds. Must be a multiple of 8 so the
    /// challenge packs cleanly into bytes (spec invariant).
    pub num_rounds: usize,
    _scalar: PhantomData<S>,
}

impl<F: Field, S: PrimeField> CurveParams<F, S> {
    pub fn new(
        p_a: F,
        q_a: F,
        p_b: F,
        q_b: F,
        montgomery_c: F,
        cofactor: u64,
        e_b: u32,
        num_rounds: usize,
    ) -> Self {
        assert_eq!(
            num_rounds % 8,
            0,
            "NUM_ROUNDS must be a multiple of 8 to pack the challenge into bytes"
        );
        assert!(e_b >= 1, "e_b must allow at least one order-check tripling");
        Self {
            p_a,
            q_a,
            p_b,
            q_b,
            montgomery_c,
            cofactor,
            e_b,
            num_rounds,
            _scalar: PhantomData,
        }
    }

    /// Challenge length in bytes (spec §3 invariant).
    pub fn challenge_len(&self) -> usize {
        self.num_rounds / 8
    }

    /// Number of tripling steps performed by the order check (e_B - 1).
    pub fn order_check_steps(&self) -> u32 {
        self.e_b - 1
    }
}
