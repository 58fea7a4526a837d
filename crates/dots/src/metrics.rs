//! Error measures for a finished simplification.
//!
//! A simplification is a strictly increasing index sequence that starts at 0
//! and ends at the last point. SED is the synchronized Euclidean distance of
//! an original point to the kept segment that spans it; kept points count as
//! zero.

use crate::error::{DotsError, DotsResult};
use crate::lssd::TrajectoryBuffer;
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorMeasure {
    /// Sum of segment LSSD divided by the number of original points.
    AverageSsedPerPoint,
    /// Largest segment LSSD.
    MaxLssd,
    /// Mean SED over all original points.
    AverageSed,
    /// Largest SED over all original points.
    MaxSed,
}

impl ErrorMeasure {
    pub const ALL: [ErrorMeasure; 4] = [
        ErrorMeasure::AverageSsedPerPoint,
        ErrorMeasure::MaxLssd,
        ErrorMeasure::AverageSed,
        ErrorMeasure::MaxSed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ErrorMeasure::AverageSsedPerPoint => "average_ssed_per_point",
            ErrorMeasure::MaxLssd => "max_lssd",
            ErrorMeasure::AverageSed => "average_sed",
            ErrorMeasure::MaxSed => "max_sed",
        }
    }
}

/// Kept-to-original size ratio; 0 for an empty input.
pub fn compression_ratio(n_in: usize, n_out: usize) -> f64 {
    if n_in == 0 {
        0.0
    } else {
        n_out as f64 / n_in as f64
    }
}

pub fn evaluate(points: &[Point], kept: &[usize], measure: ErrorMeasure) -> DotsResult<f64> {
    check_simplification(points.len(), kept)?;
    let n = points.len() as f64;
    match measure {
        ErrorMeasure::AverageSsedPerPoint | ErrorMeasure::MaxLssd => {
            let buf = TrajectoryBuffer::from_points(points);
            let mut sum = 0.0;
            let mut max = 0.0f64;
            for w in kept.windows(2) {
                let d = buf.lssd(w[0], w[1])?;
                sum += d;
                max = max.max(d);
            }
            Ok(if measure == ErrorMeasure::MaxLssd {
                max
            } else {
                sum / n
            })
        }
        ErrorMeasure::AverageSed | ErrorMeasure::MaxSed => {
            let seds = sed_per_point(points, kept)?;
            Ok(if measure == ErrorMeasure::MaxSed {
                seds.iter().copied().fold(0.0, f64::max)
            } else {
                seds.iter().sum::<f64>() / n
            })
        }
    }
}

/// SED of every original point against its spanning kept segment.
pub fn sed_per_point(points: &[Point], kept: &[usize]) -> DotsResult<Vec<f64>> {
    check_simplification(points.len(), kept)?;
    let mut seds = vec![0.0; points.len()];
    for w in kept.windows(2) {
        let (a, b) = (points[w[0]], points[w[1]]);
        if w[1] > w[0] + 1 && a.t == b.t {
            return Err(DotsError::Domain(format!(
                "points {} and {} share timestamp {}",
                w[0], w[1], a.t
            )));
        }
        for j in w[0] + 1..w[1] {
            let p = points[j];
            seds[j] = (p.pos() - a.sync_at(&b, p.t)).norm();
        }
    }
    Ok(seds)
}

fn check_simplification(n: usize, kept: &[usize]) -> DotsResult<()> {
    if n == 0 {
        return Err(DotsError::InvalidSimplification("empty trajectory".into()));
    }
    match (kept.first(), kept.last()) {
        (Some(&0), Some(&last)) if last == n - 1 => {}
        _ => {
            return Err(DotsError::InvalidSimplification(format!(
                "must start at 0 and end at {}",
                n - 1
            )))
        }
    }
    if let Some(w) = kept.windows(2).find(|w| w[1] <= w[0]) {
        return Err(DotsError::InvalidSimplification(format!(
            "indices {} and {} are not increasing",
            w[0], w[1]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 3.0, 1.0),
            Point::new(2.0, 0.0, 2.0),
            Point::new(3.0, 0.0, 3.0),
            Point::new(4.0, 4.0, 4.0),
        ]
    }

    #[test]
    fn measures_on_hand_checked_case() {
        // Segment 0→2 misses point 1 by 3; segment 2→4 (y = 2(t-2)) misses
        // point 3 by 2.
        let p = pts();
        let kept = [0, 2, 4];
        assert!((evaluate(&p, &kept, ErrorMeasure::MaxLssd).unwrap() - 9.0).abs() < 1e-9);
        assert!((evaluate(&p, &kept, ErrorMeasure::AverageSsedPerPoint).unwrap() - 13.0 / 5.0).abs() < 1e-9);
        assert!((evaluate(&p, &kept, ErrorMeasure::MaxSed).unwrap() - 3.0).abs() < 1e-12);
        assert!((evaluate(&p, &kept, ErrorMeasure::AverageSed).unwrap() - 1.0).abs() < 1e-12);
        let seds = sed_per_point(&p, &kept).unwrap();
        assert_eq!(seds, vec![0.0, 3.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn keeping_everything_is_error_free() {
        let p = pts();
        let all: Vec<usize> = (0..p.len()).collect();
        for m in ErrorMeasure::ALL {
            assert_eq!(evaluate(&p, &all, m).unwrap(), 0.0, "{}", m.name());
        }
    }

    #[test]
    fn malformed_simplifications_are_rejected() {
        let p = pts();
        let cases: [&[usize]; 5] = [&[], &[1, 4], &[0, 3], &[0, 2, 2, 4], &[0, 3, 2, 4]];
        for bad in cases {
            assert!(matches!(
                evaluate(&p, bad, ErrorMeasure::MaxSed),
                Err(DotsError::InvalidSimplification(_))
            ));
        }
        assert!(evaluate(&[], &[0], ErrorMeasure::MaxSed).is_err());
    }

    #[test]
    fn ratio() {
        assert_eq!(compression_ratio(0, 0), 0.0);
        assert_eq!(compression_ratio(8, 2), 0.25);
    }
}
