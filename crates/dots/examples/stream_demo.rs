//! Streaming walk-through on a synthetic trajectory.
//!
//! Purpose
//! - Show the feed/read_output loop, how much output is provable before the
//!   stream closes, and the error measures of the final simplification.

use std::time::Instant;

use dots::metrics::{compression_ratio, evaluate, ErrorMeasure};
use dots::synth::{random_walk, ReplayToken, WalkCfg};
use dots::{DotsCfg, Simplifier};

fn main() {
    let pts = random_walk(
        WalkCfg {
            points: 20_000,
            ..WalkCfg::default()
        },
        ReplayToken::new(2015, 12),
    );
    let cfg = DotsCfg::new(3_000.0, 2.0, 256);
    let mut s = Simplifier::new(cfg).expect("valid config");

    let start = Instant::now();
    let mut online = 0usize;
    for p in &pts {
        s.feed_point(*p).expect("strictly increasing timestamps");
        while s.read_output().is_some() {
            online += 1;
        }
    }
    s.finish();
    let mut flushed = 0usize;
    while s.read_output().is_some() {
        flushed += 1;
    }
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    let kept = s.output_indices();
    println!(
        "input={} output={} online={} flushed={} ratio={:.4} time_ms={elapsed_ms:.3}",
        pts.len(),
        kept.len(),
        online,
        flushed,
        compression_ratio(pts.len(), kept.len())
    );
    for m in ErrorMeasure::ALL {
        let v = evaluate(&pts, kept, m).expect("valid simplification");
        println!("{}={v:.6}", m.name());
    }
}
