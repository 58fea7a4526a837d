//! Append-only prefix sums over the fed stream.
//!
//! Entry `i` holds the sums of x, y, t, x², y², t², xt and yt over the closed
//! range `[0, i]`, so any closed range sum is one subtraction away. The length
//! always equals the number of fed points.

use std::ops::{Add, Sub};

use crate::error::{DotsError, DotsResult};
use crate::types::Point;

/// Which of the eight running sums to query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SumKind {
    X,
    Y,
    T,
    X2,
    Y2,
    T2,
    Xt,
    Yt,
}

impl SumKind {
    pub const ALL: [SumKind; 8] = [
        SumKind::X,
        SumKind::Y,
        SumKind::T,
        SumKind::X2,
        SumKind::Y2,
        SumKind::T2,
        SumKind::Xt,
        SumKind::Yt,
    ];
}

/// First and second moments of a run of points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    pub x: f64,
    pub y: f64,
    pub t: f64,
    pub x2: f64,
    pub y2: f64,
    pub t2: f64,
    pub xt: f64,
    pub yt: f64,
}

impl Moments {
    #[inline]
    pub fn of(p: &Point) -> Self {
        Self {
            x: p.x,
            y: p.y,
            t: p.t,
            x2: p.x * p.x,
            y2: p.y * p.y,
            t2: p.t * p.t,
            xt: p.x * p.t,
            yt: p.y * p.t,
        }
    }

    #[inline]
    pub fn get(&self, kind: SumKind) -> f64 {
        match kind {
            SumKind::X => self.x,
            SumKind::Y => self.y,
            SumKind::T => self.t,
            SumKind::X2 => self.x2,
            SumKind::Y2 => self.y2,
            SumKind::T2 => self.t2,
            SumKind::Xt => self.xt,
            SumKind::Yt => self.yt,
        }
    }
}

impl Add for Moments {
    type Output = Moments;
    #[inline]
    fn add(self, o: Moments) -> Moments {
        Moments {
            x: self.x + o.x,
            y: self.y + o.y,
            t: self.t + o.t,
            x2: self.x2 + o.x2,
            y2: self.y2 + o.y2,
            t2: self.t2 + o.t2,
            xt: self.xt + o.xt,
            yt: self.yt + o.yt,
        }
    }
}

impl Sub for Moments {
    type Output = Moments;
    #[inline]
    fn sub(self, o: Moments) -> Moments {
        Moments {
            x: self.x - o.x,
            y: self.y - o.y,
            t: self.t - o.t,
            x2: self.x2 - o.x2,
            y2: self.y2 - o.y2,
            t2: self.t2 - o.t2,
            xt: self.xt - o.xt,
            yt: self.yt - o.yt,
        }
    }
}

/// Prefix sums of `Moments`, index-aligned with the trajectory buffer.
#[derive(Clone, Debug, Default)]
pub struct PrefixStats {
    prefix: Vec<Moments>,
}

impl PrefixStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Extend every running sum by the contribution of `p`. O(1).
    pub fn append(&mut self, p: &Point) {
        let last = self.prefix.last().copied().unwrap_or_default();
        self.prefix.push(last + Moments::of(p));
    }

    /// Moments over the closed range `[lo, hi]`.
    pub fn range(&self, lo: usize, hi: usize) -> DotsResult<Moments> {
        if lo > hi {
            return Err(DotsError::EmptyRange { lo, hi });
        }
        if hi >= self.prefix.len() {
            return Err(DotsError::IndexOutOfRange {
                index: hi,
                len: self.prefix.len(),
            });
        }
        Ok(self.range_unchecked(lo, hi))
    }

    /// Sum of one kind over the closed range `[lo, hi]`.
    pub fn range_sum(&self, kind: SumKind, lo: usize, hi: usize) -> DotsResult<f64> {
        self.range(lo, hi).map(|m| m.get(kind))
    }

    /// Caller guarantees `lo <= hi < len`.
    #[inline]
    pub(crate) fn range_unchecked(&self, lo: usize, hi: usize) -> Moments {
        debug_assert!(lo <= hi && hi < self.prefix.len());
        let upper = self.prefix[hi];
        if lo == 0 {
            upper
        } else {
            upper - self.prefix[lo - 1]
        }
    }
}
