//! Point and configuration types.
//!
//! - `Point`: one timestamped planar sample.
//! - `DotsCfg`: per-instance search parameters, validated on construction.

use nalgebra::Vector2;

use crate::error::{DotsError, DotsResult};

/// Timestamped planar position. Its sequence index is assigned at ingestion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }
    #[inline]
    pub fn pos(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
    /// Same sample expressed relative to `origin` in space and time.
    #[inline]
    pub fn relative_to(&self, origin: &Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y, self.t - origin.t)
    }
    /// Position on the chord `self → other` at time `t` (synchronized, not nearest).
    #[inline]
    pub fn sync_at(&self, other: &Point, t: f64) -> Vector2<f64> {
        let k = (t - self.t) / (other.t - self.t);
        self.pos() * (1.0 - k) + other.pos() * k
    }
}

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotsCfg {
    /// Upper bound on the LSSD of every kept segment (exclusive).
    pub error_threshold: f64,
    /// A candidate parent whose LSSD to the scanned point exceeds
    /// `error_threshold * termination_factor` is retired for the rest of the layer.
    pub termination_factor: f64,
    /// Hard ceiling on the size of the layer under construction.
    pub max_frontier_width: usize,
}

impl Default for DotsCfg {
    fn default() -> Self {
        Self {
            error_threshold: 10_000.0,
            termination_factor: 2.0,
            max_frontier_width: 1_000_000,
        }
    }
}

impl DotsCfg {
    pub fn new(error_threshold: f64, termination_factor: f64, max_frontier_width: usize) -> Self {
        Self {
            error_threshold,
            termination_factor,
            max_frontier_width,
        }
    }

    /// LSSD above which a candidate parent is terminated.
    #[inline]
    pub fn termination_bound(&self) -> f64 {
        self.error_threshold * self.termination_factor
    }

    pub fn validate(&self) -> DotsResult<()> {
        if !(self.error_threshold.is_finite() && self.error_threshold > 0.0) {
            return Err(DotsError::InvalidConfig(format!(
                "error_threshold must be finite and positive, got {}",
                self.error_threshold
            )));
        }
        if !(self.termination_factor.is_finite() && self.termination_factor > 1.0) {
            return Err(DotsError::InvalidConfig(format!(
                "termination_factor must be finite and > 1, got {}",
                self.termination_factor
            )));
        }
        if self.max_frontier_width == 0 {
            return Err(DotsError::InvalidConfig(
                "max_frontier_width must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cfg_is_valid() {
        assert!(DotsCfg::default().validate().is_ok());
        assert_eq!(DotsCfg::default().termination_bound(), 20_000.0);
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        assert!(DotsCfg::new(0.0, 2.0, 8).validate().is_err());
        assert!(DotsCfg::new(-1.0, 2.0, 8).validate().is_err());
        assert!(DotsCfg::new(f64::NAN, 2.0, 8).validate().is_err());
        assert!(DotsCfg::new(1.0, 1.0, 8).validate().is_err());
        assert!(DotsCfg::new(1.0, f64::INFINITY, 8).validate().is_err());
        assert!(matches!(
            DotsCfg::new(1.0, 2.0, 0).validate(),
            Err(DotsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn relative_to_shifts_all_axes() {
        let o = Point::new(4.0e5, 6.0e6, 1.7e9);
        let p = Point::new(4.0e5 + 12.0, 6.0e6 - 3.0, 1.7e9 + 5.0);
        assert_eq!(p.relative_to(&o), Point::new(12.0, -3.0, 5.0));
    }

    #[test]
    fn sync_at_interpolates_by_time() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(10.0, -4.0, 4.0);
        let p = a.sync_at(&b, 1.0);
        assert!((p.x - 2.5).abs() < 1e-12);
        assert!((p.y + 1.0).abs() < 1e-12);
    }
}
