//! Batched Montgomery inversion (spec §4.1): amortize one real Fp²
//! inversion across every worker that needs one this round, instead of
//! paying for `N` separate inversions.

use ark_ff::Field;
use parking_lot::{Condvar, Mutex};

const LOG_TARGET: &str = "sidh_signature::batch";

struct BatchState<F> {
    inputs: Vec<F>,
    outputs: Vec<F>,
    done: bool,
}

/// Shared-memory coordination point for one round of batched
/// inversions. Capacity is fixed at construction (spec: "the batch's
/// declared capacity equals the number of rounds whose work reaches
/// the inverter").
pub struct Batch<F: Field> {
    capacity: usize,
    state: Mutex<BatchState<F>>,
    completed: Condvar,
}

impl<F: Field> Batch<F> {
    pub fn new(capacity: usize) -> Self {
        let done = capacity == 0;
        Batch {
            capacity,
            state: Mutex::new(BatchState {
                inputs: Vec::with_capacity(capacity),
                outputs: Vec::new(),
                done,
            }),
            completed: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append `x` and return its slot index. The thread that submits
    /// the `capacity`-th element performs the batched inversion itself,
    /// under the same lock that guards submission (spec §5's race
    /// hazard note), then wakes every waiter. Every other submitter
    /// blocks on the completion signal.
    pub fn submit(&self, x: F) -> usize {
        let mut guard = self.state.lock();
        let slot = guard.inputs.len();
        guard.inputs.push(x);

        if guard.inputs.len() == self.capacity {
            tracing::debug!(target: LOG_TARGET, capacity = self.capacity, "last submitter, running batched inversion");
            let outputs = Self::invert_all(&guard.inputs);
            guard.outputs = outputs;
            guard.done = true;
            self.completed.notify_all();
        } else {
            while !guard.done {
                self.completed.wait(&mut guard);
            }
        }

        slot
    }

    /// Fetch the inverse computed for `slot`. Only valid after the
    /// batch has completed (i.e. after `submit` has returned for that
    /// slot).
    pub fn result(&self, slot: usize) -> F {
        let guard = self.state.lock();
        debug_assert!(guard.done, "result() called before batch completed");
        guard.outputs[slot]
    }

    /// Montgomery's trick: one real inversion plus `3(N-1)`
    /// multiplications (spec §4.1 algorithm).
    fn invert_all(inputs: &[F]) -> Vec<F> {
        let n = inputs.len();
        if n == 0 {
            return Vec::new();
        }

        let mut prefix = Vec::with_capacity(n);
        prefix.push(inputs[0]);
        for x in &inputs[1..] {
            let last = *prefix.last().unwrap();
            prefix.push(last * x);
        }

        let mut inv = prefix[n - 1]
            .inverse()
            .expect("batch inverter received a non-invertible element");

        let mut outputs = vec![F::zero(); n];
        for i in (1..n).rev() {
            outputs[i] = inv * prefix[i - 1];
            inv *= inputs[i];
        }
        outputs[0] = inv;

        outputs
    }
}
