//! Round worker pool (spec §4.2): a fixed pool of workers pulling round
//! indices from a shared counter. Ownership is scoped to one call via
//! [`std::thread::scope`] rather than the original's process-global
//! `CUR_ROUND`/`NUM_THREADS` (Design Notes §9).

use parking_lot::Mutex;
use std::sync::mpsc;

/// Run `body` once per round in `0..num_rounds`, across `workers`
/// threads (clamped to at least 1), and return the per-round results
/// indexed by round id.
///
/// Rounds are claimed in FIFO order from a shared counter but executed
/// in whatever order threads happen to run; because each round's
/// output is placed into its own slot by round id, the nondeterministic
/// completion order never affects the result (spec §4.2).
pub fn run_rounds<T, Body>(num_rounds: usize, workers: usize, body: Body) -> Vec<T>
where
    T: Send,
    Body: Fn(usize) -> T + Sync,
{
    let workers = workers.max(1);
    let counter = Mutex::new(0usize);
    let (tx, rx) = mpsc::channel::<(usize, T)>();

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let counter = &counter;
            let body = &body;
            let tx = tx.clone();
            scope.spawn(move || loop {
                let round = {
                    let mut next = counter.lock();
                    if *next >= num_rounds {
                        break;
                    }
                    let claimed = *next;
                    *next += 1;
                    claimed
                };
                let output = body(round);
                tx.send((round, output))
                    .expect("round pool receiver dropped while workers were still running");
            });
        }
        drop(tx);
    });

    let mut slots: Vec<Option<T>> = (0..num_rounds).map(|_| None).collect();
    for (round, output) in rx {
        slots[round] = Some(output);
    }
    slots
        .into_iter()
        .enumerate()
        .map(|(round, slot)| slot.unwrap_or_else(|| panic!("round {round} produced no output")))
        .collect()
}
