//! Statistics and timing for a batch of sampled monotone curves.
//!
//! Purpose
//! - Give a quick, reproducible feel for metric values and recomputation cost
//!   on curves larger than anything typed in by hand.
//!
//! Run: `cargo run -p ncurve --example sampled_stats`

use std::time::Instant;

use ncurve::prelude::*;

fn main() {
    let cfg = MonotoneCfg {
        point_count: 5000,
        step_min: 0.01,
        step_max: 0.02,
        y_min: 0.0,
        y_max: 1.0,
        ..MonotoneCfg::default()
    };
    for index in 0..4 {
        let start = Instant::now();
        let curve = draw_monotone_curve(cfg, ReplayToken { seed: 7, index });
        let build_ms = start.elapsed().as_secs_f64() * 1e3;
        let Ok(m) = curve.metrics() else {
            println!("index={index} empty");
            continue;
        };
        // Uniform y in [0, 1] over an x extent of ~75: area ≈ extent / 2.
        println!(
            "index={index} n={} length={:.6} area={:.6} low=({:.4},{:.4}) high=({:.4},{:.4}) build_ms={build_ms:.3}",
            curve.len(),
            m.length,
            m.area,
            m.low.x,
            m.low.y,
            m.high.x,
            m.high.y,
        );
    }
}
