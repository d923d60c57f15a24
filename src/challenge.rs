//! Fiat-Shamir challenge derivation, shared between [`crate::signer`]
//! and [`crate::verifier`] so the two sides compute byte-identical
//! `cHash` given the same commitments and `HashResp` table (spec §4.3
//! step 7 / §4.4 step 1, tested as "Determinism of the challenge" in
//! spec §8).

use crate::prim::FieldBytes;
use crate::signature::HashResp;
use ark_ff::Field;

/// `cHash = Keccak(Commitments1 || Commitments2 || HashResp, num_rounds/8)`.
pub fn compute<F: Field + FieldBytes>(
    commitments1: &[F],
    commitments2: &[F],
    hash_resp: &[HashResp],
    challenge_len: usize,
) -> Vec<u8> {
    let mut datastring = Vec::new();
    for c in commitments1 {
        datastring.extend(c.to_be_bytes());
    }
    for c in commitments2 {
        datastring.extend(c.to_be_bytes());
    }
    for h in hash_resp {
        datastring.extend_from_slice(&h.random_hash);
        datastring.extend_from_slice(&h.response_hash);
    }
    crate::prim::keccak_xof(&datastring, challenge_len)
}

/// Challenge bit for round `r`: bit `j` of byte `i` where `i = r/8`,
/// `j = r mod 8` (spec §4.4 step 3).
pub fn bit(c_hash: &[u8], round: usize) -> bool {
    let byte = c_hash[round / 8];
    (byte & (1 << (round % 8))) != 0
}

/// Count rounds whose challenge bit is 0 and 1, respectively -- used to
/// size the verifier's batches before dispatching workers (spec §4.4
/// step 2 / Design Notes "compute the challenge first, then allocate
/// sized batches").
pub fn count_bits(c_hash: &[u8], num_rounds: usize) -> (usize, usize) {
    let ones = (0..num_rounds).filter(|&r| bit(c_hash, r)).count();
    (num_rounds - ones, ones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::Fq2;

    #[test]
    fn bit_indexing_matches_round_over_8() {
        // byte 0 = 0b0000_0101 -> bits 0 and 2 set
        let c_hash = [0b0000_0101u8, 0, 0, 0];
        assert!(bit(&c_hash, 0));
        assert!(!bit(&c_hash, 1));
        assert!(bit(&c_hash, 2));
        assert!(!bit(&c_hash, 7));
    }

    #[test]
    fn count_bits_matches_manual_count() {
        let c_hash = [0b1010_1010u8];
        let (zeros, ones) = count_bits(&c_hash, 8);
        assert_eq!(zeros, 4);
        assert_eq!(ones, 4);
    }

    #[test]
    fn determinism_given_identical_inputs() {
        let commitments1 = vec![Fq2::from(1u64), Fq2::from(2u64)];
        let commitments2 = vec![Fq2::from(3u64), Fq2::from(4u64)];
        let hash_resp = vec![
            HashResp {
                random_hash: [1u8; 32],
                response_hash: [2u8; 32],
            },
            HashResp {
                random_hash: [3u8; 32],
                response_hash: [4u8; 32],
            },
        ];
        let a = compute(&commitments1, &commitments2, &hash_resp, 1);
        let b = compute(&commitments1, &commitments2, &hash_resp, 1);
        assert_eq!(a, b);
    }
}
