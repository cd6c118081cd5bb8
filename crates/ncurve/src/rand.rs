//! Random monotone curves (jittered X steps + replay tokens).
//!
//! Model
//! - Start at `x_start`, then take `point_count - 1` steps of random size in
//!   `[step_min, step_max]` in the configured direction; Y is uniform in
//!   `[y_min, y_max]`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `Curve`, `policy::admit`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::curve::{point, Curve, Direction};

/// Random-curve sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct MonotoneCfg {
    pub point_count: usize,
    /// Smallest X step. Clamped to a tiny positive value so X stays strict.
    pub step_min: f64,
    pub step_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_start: f64,
    /// `Undetermined` is treated as `Ascending`.
    pub direction: Direction,
}

impl Default for MonotoneCfg {
    fn default() -> Self {
        Self {
            point_count: 32,
            step_min: 0.1,
            step_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
            x_start: 0.0,
            direction: Direction::Ascending,
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

/// Draw a random curve whose X values strictly follow `cfg.direction`.
pub fn draw_monotone_curve(cfg: MonotoneCfg, tok: ReplayToken) -> Curve {
    let mut rng = tok.to_std_rng();
    let lo = cfg.step_min.max(1e-9);
    let hi = cfg.step_max.max(lo);
    let (y_lo, y_hi) = if cfg.y_min <= cfg.y_max {
        (cfg.y_min, cfg.y_max)
    } else {
        (cfg.y_max, cfg.y_min)
    };
    let sign = match cfg.direction {
        Direction::Descending => -1.0,
        _ => 1.0,
    };
    let mut curve = Curve::new();
    let mut x = cfg.x_start;
    for k in 0..cfg.point_count {
        if k > 0 {
            x += sign * (lo + rng.gen::<f64>() * (hi - lo));
        }
        let y = y_lo + rng.gen::<f64>() * (y_hi - y_lo);
        if let Err(reason) = curve.push(point(x, y)) {
            // Only reachable once steps vanish against |x| in floating point.
            tracing::warn!(%reason, drawn = curve.len(), "stopping draw early");
            break;
        }
    }
    curve
}
