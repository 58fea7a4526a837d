//! Whole-trajectory convenience wrappers around the streaming simplifier.

use crate::error::DotsResult;
use crate::search::Simplifier;
use crate::types::{DotsCfg, Point};

/// Feed every point, finish, and return the kept indices.
pub fn simplify_indices(points: &[Point], cfg: DotsCfg) -> DotsResult<Vec<usize>> {
    let mut s = Simplifier::new(cfg)?;
    for p in points {
        s.feed_point(*p)?;
    }
    s.finish();
    Ok(s.output_indices().to_vec())
}

/// Same as `simplify_indices`, returning the kept points.
pub fn simplify(points: &[Point], cfg: DotsCfg) -> DotsResult<Vec<Point>> {
    let kept = simplify_indices(points, cfg)?;
    Ok(kept.into_iter().map(|i| points[i]).collect())
}
