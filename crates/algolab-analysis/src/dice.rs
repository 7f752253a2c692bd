use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Smallest possible two-die sum.
pub const MIN_SUM: u8 = 2;
/// Largest possible two-die sum.
pub const MAX_SUM: u8 = 12;

/// Ways to roll `sum` with two six-sided dice; 0 outside 2..=12.
pub fn combinations(sum: u8) -> u32 {
    if !(MIN_SUM..=MAX_SUM).contains(&sum) {
        return 0;
    }
    (6 - (7 - i32::from(sum)).abs()) as u32
}

pub fn theoretical_probability(sum: u8) -> f64 {
    f64::from(combinations(sum)) / 36.0
}

pub fn theoretical_probabilities() -> BTreeMap<u8, f64> {
    (MIN_SUM..=MAX_SUM)
        .map(|sum| (sum, theoretical_probability(sum)))
        .collect()
}

pub fn roll_die<R: Rng>(rng: &mut R) -> u8 {
    rng.random_range(1..=6)
}

pub fn roll_pair<R: Rng>(rng: &mut R) -> u8 {
    roll_die(rng) + roll_die(rng)
}

/// Observed counts of two-die sums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiceTally {
    counts: [u64; 11],
    trials: u64,
}

impl DiceTally {
    pub fn record(&mut self, sum: u8) {
        debug_assert!((MIN_SUM..=MAX_SUM).contains(&sum));
        if let Some(slot) = self.counts.get_mut(usize::from(sum.wrapping_sub(MIN_SUM))) {
            *slot += 1;
            self.trials += 1;
        }
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn count(&self, sum: u8) -> u64 {
        self.counts
            .get(usize::from(sum.wrapping_sub(MIN_SUM)))
            .copied()
            .unwrap_or(0)
    }

    /// Observed probability of `sum`; 0 before any trial is recorded.
    pub fn probability(&self, sum: u8) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.count(sum) as f64 / self.trials as f64
    }

    pub fn merge(mut self, other: Self) -> Self {
        for (slot, count) in self.counts.iter_mut().zip(other.counts) {
            *slot += count;
        }
        self.trials += other.trials;
        self
    }
}

/// Rolls two dice `trials` times into a tally. Deterministic for a seeded
/// `rng`.
pub fn simulate<R: Rng>(trials: u64, rng: &mut R) -> DiceTally {
    let mut tally = DiceTally::default();
    for _ in 0..trials {
        tally.record(roll_pair(rng));
    }
    tally
}

/// Fans the trial budget out over the rayon pool, one RNG per worker.
///
/// With `seed` given, worker RNGs derive from it deterministically, so a
/// given (seed, thread count) pair reproduces the same tally.
pub fn simulate_parallel(trials: u64, seed: Option<u64>) -> DiceTally {
    let workers = rayon::current_num_threads().max(1) as u64;
    let base = trials / workers;
    let remainder = trials % workers;

    debug!(trials, workers, "running dice simulation");
    (0..workers)
        .into_par_iter()
        .map(|worker| {
            let quota = base + u64::from(worker < remainder);
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s.wrapping_add(worker)),
                None => StdRng::from_os_rng(),
            };
            simulate(quota, &mut rng)
        })
        .reduce(DiceTally::default, DiceTally::merge)
}

/// One row of the simulated-vs-theoretical comparison.
#[derive(Debug, Clone, Serialize)]
pub struct DiceRow {
    pub sum: u8,
    pub simulated: f64,
    pub theoretical: f64,
    pub abs_error: f64,
    pub relative_error_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiceReport {
    pub trials: u64,
    pub rows: Vec<DiceRow>,
    pub mean_abs_error: f64,
}

/// Lines a tally up against the analytic distribution.
pub fn compare(tally: &DiceTally) -> DiceReport {
    let rows: Vec<DiceRow> = (MIN_SUM..=MAX_SUM)
        .map(|sum| {
            let simulated = tally.probability(sum);
            let theoretical = theoretical_probability(sum);
            let abs_error = (simulated - theoretical).abs();
            DiceRow {
                sum,
                simulated,
                theoretical,
                abs_error,
                relative_error_pct: abs_error / theoretical * 100.0,
            }
        })
        .collect();

    let mean_abs_error = rows.iter().map(|r| r.abs_error).sum::<f64>() / rows.len() as f64;
    DiceReport {
        trials: tally.trials(),
        rows,
        mean_abs_error,
    }
}
