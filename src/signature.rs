use crate::prim::FieldBytes;
use ark_ff::{Field, PrimeField};

/// A projective `(X:Z)` point over Fp², as used for the uncompressed
/// response point psi(S) (spec §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectivePoint<F: Field> {
    pub x: F,
    pub z: F,
}

impl<F: Field> ProjectivePoint<F> {
    pub fn new(x: F, z: F) -> Self {
        Self { x, z }
    }

    /// True once `Z` is the additive identity, i.e. this is the point
    /// at infinity.
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }
}

impl<F: Field + FieldBytes> ProjectivePoint<F> {
    fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = self.x.to_be_bytes();
        out.extend(self.z.to_be_bytes());
        out
    }
}

/// Compressed psi(S): a scalar pair `(a, b) mod ℓ_B^{e_B}` expressing
/// psi(S) on the fixed basis `(U, V)` of `E/⟨R⟩[ℓ_B^{e_B}]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressedPsiS<S: PrimeField> {
    pub a: S,
    pub b: S,
}

impl<S: PrimeField> CompressedPsiS<S> {
    fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = self.a.into_bigint().to_bytes_be();
        out.extend(self.b.into_bigint().to_bytes_be());
        out
    }
}

/// The per-round response, in whichever of the two forms the
/// signature's `compressed` flag selects (spec §3 invariant: exactly
/// one of the two is present per round).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PsiSValue<F: Field, S: PrimeField> {
    Projective(ProjectivePoint<F>),
    Compressed { scalars: CompressedPsiS<S>, bit: bool },
}

impl<F: Field + FieldBytes, S: PrimeField> PsiSValue<F, S> {
    /// Byte image hashed into `HashResp[2r+1]` (spec §4.3 step 6).
    ///
    /// Matches `original_source/SIDH_signature.c:279`, which hashes only
    /// `sig->compPsiS[r]` (`sizeof(digit_t) * NWORDS_ORDER` bytes) --
    /// the disambiguation bit is stored in the signature but is not
    /// part of the hashed byte image.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        match self {
            PsiSValue::Projective(p) => p.to_be_bytes(),
            PsiSValue::Compressed { scalars, .. } => scalars.to_be_bytes(),
        }
    }
}

/// Per-round pair of digests: `Keccak256(R_r)` and
/// `Keccak256(response_r)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashResp {
    pub random_hash: [u8; 32],
    pub response_hash: [u8; 32],
}

/// A complete `NUM_ROUNDS`-round signature (spec §3).
#[derive(Clone, Debug)]
pub struct Signature<F: Field, S: PrimeField> {
    pub randoms: Vec<S>,
    pub commitments1: Vec<F>,
    pub commitments2: Vec<F>,
    pub hash_resp: Vec<HashResp>,
    pub psi_s: Vec<PsiSValue<F, S>>,
    pub compressed: bool,
}

impl<F: Field, S: PrimeField> Signature<F, S> {
    pub fn num_rounds(&self) -> usize {
        self.randoms.len()
    }
}
