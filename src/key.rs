use ark_ff::{Field, PrimeField};
use zeroize::Zeroize;

/// Long-term secret scalar, mod ℓ_B^{e_B}.
///
/// `ark_ff` field types have no heap allocation to scrub, but they also
/// don't implement `Zeroize` generically, so the wipe is done by hand:
/// overwrite with the additive identity on drop, matching the intent of
/// the `Zeroize`/`ZeroizeOnDrop` derives on `domain/mod.rs::PlayerSecret`.
#[derive(Clone)]
pub struct PrivateKey<S: PrimeField>(pub(crate) S);

impl<S: PrimeField> PrivateKey<S> {
    pub fn new(scalar: S) -> Self {
        Self(scalar)
    }

    pub fn scalar(&self) -> &S {
        &self.0
    }
}

impl<S: PrimeField> Zeroize for PrivateKey<S> {
    fn zeroize(&mut self) {
        self.0 = S::zero();
    }
}

impl<S: PrimeField> Drop for PrivateKey<S> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Public key triple `(φ_A(P_B), φ_A(Q_B), φ_A(P_B − Q_B))`, encoded as
/// Fp² elements (spec §3). Opaque to the core beyond being handed to
/// the primitive trait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey<F: Field>(pub [F; 3]);

impl<F: Field> PublicKey<F> {
    pub fn new(triple: [F; 3]) -> Self {
        Self(triple)
    }
}
