//! Local integral squared synchronous Euclidean distance (LSSD).
//!
//! For a chord `fst → lst`, every fed point strictly between the two is
//! compared with the chord position at its own timestamp; LSSD is the sum of
//! squared x and y deviations. The sum is evaluated in closed form from the
//! prefix sums over `[fst, lst-1]`, so cost is O(1) in the span width. The
//! `fst` term contributes zero because the chord passes through it.
//!
//! Per axis, with `ξ = x - x_fst`, `τ = t - t_fst` and slope `b = Δx / Δt`:
//! `Σ (ξ - bτ)² = Σξ² - 2b Σξτ + b² Στ²`, where the centered sums are expanded
//! from the prefix sums.
//!
//! The prefix sums hold coordinates relative to the first fed point. Epoch
//! timestamps and projected metre coordinates would otherwise square to
//! ~1e18 and the expansion would cancel away the residual.

use crate::error::{DotsError, DotsResult};
use crate::stats::{Moments, PrefixStats};
use crate::types::Point;

/// Append-only trajectory: fed points plus their prefix sums.
#[derive(Clone, Debug, Default)]
pub struct TrajectoryBuffer {
    points: Vec<Point>,
    stats: PrefixStats,
    /// First fed point; every sum is taken relative to it.
    origin: Option<Point>,
}

impl TrajectoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: &[Point]) -> Self {
        let mut buf = Self::new();
        for p in points {
            buf.push(*p);
        }
        buf
    }

    /// Append `p`; returns its sequence index.
    pub fn push(&mut self, p: Point) -> usize {
        let origin = *self.origin.get_or_insert(p);
        self.stats.append(&p.relative_to(&origin));
        self.points.push(p);
        debug_assert_eq!(self.points.len(), self.stats.len());
        self.points.len() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Checked LSSD of the chord `fst → lst`.
    ///
    /// Requires `fst < lst < len`. Adjacent indices give exactly 0. Equal
    /// endpoint timestamps are a `Domain` error.
    pub fn lssd(&self, fst: usize, lst: usize) -> DotsResult<f64> {
        if lst >= self.len() {
            return Err(DotsError::IndexOutOfRange {
                index: lst,
                len: self.len(),
            });
        }
        if fst >= lst {
            return Err(DotsError::Domain(format!(
                "chord needs fst < lst, got {fst} and {lst}"
            )));
        }
        if lst == fst + 1 {
            return Ok(0.0);
        }
        let (a, b) = (&self.points[fst], &self.points[lst]);
        if a.t == b.t {
            return Err(DotsError::Domain(format!(
                "points {fst} and {lst} share timestamp {}",
                a.t
            )));
        }
        Ok(self.lssd_unchecked(fst, lst))
    }

    /// LSSD without argument checks. The simplifier only calls this with
    /// `fst < lst < len` on strictly increasing timestamps.
    #[inline]
    pub(crate) fn lssd_unchecked(&self, fst: usize, lst: usize) -> f64 {
        let Some(origin) = self.origin else {
            return 0.0;
        };
        if lst <= fst + 1 {
            return 0.0;
        }
        let interior = self.stats.range_unchecked(fst, lst - 1);
        let a = self.points[fst].relative_to(&origin);
        let b = self.points[lst].relative_to(&origin);
        chord_residual(&a, &b, &interior, (lst - fst) as f64)
    }
}

/// Closed-form squared synchronized residual of `n` points with moments `m`
/// against the chord `a → b`. Clamped at zero against rounding.
pub fn chord_residual(a: &Point, b: &Point, m: &Moments, n: f64) -> f64 {
    let dt = b.t - a.t;
    let tt = m.t2 - 2.0 * a.t * m.t + n * a.t * a.t;
    let axis = |s: f64, s2: f64, st: f64, v0: f64, v1: f64| {
        let slope = (v1 - v0) / dt;
        let vv = s2 - 2.0 * v0 * s + n * v0 * v0;
        let vt = st - a.t * s - v0 * m.t + n * v0 * a.t;
        vv - 2.0 * slope * vt + slope * slope * tt
    };
    let rx = axis(m.x, m.x2, m.xt, a.x, b.x);
    let ry = axis(m.y, m.y2, m.yt, a.y, b.y);
    (rx + ry).max(0.0)
}
