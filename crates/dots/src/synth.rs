//! Reproducible random-walk trajectories (replay tokens).
//!
//! Purpose
//! - Give tests, benchmarks and the CLI a deterministic stream of
//!   strictly-timed points without shipping dataset files.
//!
//! Model
//! - Constant-ish velocity: each step turns the heading by a bounded jitter
//!   and rescales the speed by a bounded factor. With probability `pause_prob`
//!   the walker stands still for a step.
//! - Time steps are drawn from `[dt_min, dt_max]` with `dt_min > 0`, so
//!   timestamps are strictly increasing.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Point;

/// Random-walk configuration.
#[derive(Clone, Copy, Debug)]
pub struct WalkCfg {
    pub points: usize,
    /// Mean speed in position units per time unit.
    pub speed: f64,
    /// Per-step speed jitter (relative amplitude), clamped to [0, 0.95].
    pub speed_jitter: f64,
    /// Per-step heading change bound in radians.
    pub heading_jitter: f64,
    pub dt_min: f64,
    pub dt_max: f64,
    /// Chance of a zero-displacement step.
    pub pause_prob: f64,
}

impl Default for WalkCfg {
    fn default() -> Self {
        Self {
            points: 1_000,
            speed: 10.0,
            speed_jitter: 0.3,
            heading_jitter: 0.4,
            dt_min: 1.0,
            dt_max: 5.0,
            pause_prob: 0.05,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random walk starting at the origin at `t = 0`.
pub fn random_walk(cfg: WalkCfg, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.to_std_rng();
    let dt_min = cfg.dt_min.max(1e-6);
    let dt_max = cfg.dt_max.max(dt_min);
    let sj = cfg.speed_jitter.clamp(0.0, 0.95);
    let hj = cfg.heading_jitter.abs();
    let pause = cfg.pause_prob.clamp(0.0, 1.0);

    let mut out = Vec::with_capacity(cfg.points);
    let (mut x, mut y, mut t) = (0.0, 0.0, 0.0);
    let mut heading = rng.gen::<f64>() * 2.0 * PI;
    for k in 0..cfg.points {
        if k > 0 {
            let dt = if dt_max > dt_min {
                rng.gen_range(dt_min..=dt_max)
            } else {
                dt_min
            };
            t += dt;
            if rng.gen::<f64>() >= pause {
                heading += (rng.gen::<f64>() * 2.0 - 1.0) * hj;
                let v = cfg.speed * (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * sj);
                x += heading.cos() * v * dt;
                y += heading.sin() * v * dt;
            }
        }
        out.push(Point::new(x, y, t));
    }
    out
}
