//! Public streaming API.

use tracing::{debug, info, warn};

use super::decode::PathTracker;
use super::frontier::Frontier;
use crate::error::{DotsError, DotsResult};
use crate::lssd::TrajectoryBuffer;
use crate::types::{DotsCfg, Point};

/// Lifecycle of a `Simplifier`. `Finished` is only left through `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimplifierState {
    Open,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Stream still open: stop once no layer swap is possible.
    Incremental,
    /// Stream closed: drain every point, then decode the tail.
    Finalize,
}

/// Online trajectory simplifier.
///
/// ```
/// use dots::{DotsCfg, Simplifier};
///
/// let mut s = Simplifier::new(DotsCfg::new(1.0, 2.0, 64)).unwrap();
/// let mut kept = Vec::new();
/// for (x, t) in [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (100.0, 3.0)] {
///     s.feed(x, 0.0, t).unwrap();
///     while let Some(p) = s.read_output() {
///         kept.push(p);
///     }
/// }
/// s.finish();
/// while let Some(p) = s.read_output() {
///     kept.push(p);
/// }
/// assert_eq!(s.output_indices(), &[0, 2, 3]);
/// assert_eq!(kept.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Simplifier {
    cfg: DotsCfg,
    state: SimplifierState,
    traj: TrajectoryBuffer,
    frontier: Frontier,
    paths: PathTracker,
    /// Committed indices, strictly increasing, starting at 0.
    output: Vec<usize>,
    /// Read cursor into `output`.
    read: usize,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::with_cfg(DotsCfg::default())
    }
}

impl Simplifier {
    /// Validate `cfg` and build an empty, open simplifier.
    pub fn new(cfg: DotsCfg) -> DotsResult<Self> {
        cfg.validate()?;
        Ok(Self::with_cfg(cfg))
    }

    fn with_cfg(cfg: DotsCfg) -> Self {
        Self {
            cfg,
            state: SimplifierState::Open,
            traj: TrajectoryBuffer::new(),
            frontier: Frontier::new(),
            paths: PathTracker::new(),
            output: Vec::new(),
            read: 0,
        }
    }

    #[inline]
    pub fn cfg(&self) -> &DotsCfg {
        &self.cfg
    }
    #[inline]
    pub fn state(&self) -> SimplifierState {
        self.state
    }
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == SimplifierState::Finished
    }
    /// Number of fed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.traj.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.traj.is_empty()
    }
    /// Every index committed so far, including those already read.
    #[inline]
    pub fn output_indices(&self) -> &[usize] {
        &self.output
    }
    /// Committed but not yet read.
    #[inline]
    pub fn pending(&self) -> usize {
        self.output.len() - self.read
    }

    /// LSSD of the chord `fst → lst` over the fed points.
    pub fn lssd(&self, fst: usize, lst: usize) -> DotsResult<f64> {
        self.traj.lssd(fst, lst)
    }

    /// Append one point. Timestamps must increase strictly; a rejected point
    /// leaves the simplifier untouched.
    pub fn feed(&mut self, x: f64, y: f64, t: f64) -> DotsResult<()> {
        self.feed_point(Point::new(x, y, t))
    }

    pub fn feed_point(&mut self, p: Point) -> DotsResult<()> {
        if self.is_finished() {
            return Err(DotsError::InvalidState("feed after finish"));
        }
        if let Some(last) = self.traj.last() {
            if !(p.t > last.t) {
                return Err(DotsError::Domain(format!(
                    "timestamp {} does not follow {} at index {}",
                    p.t,
                    last.t,
                    self.traj.len() - 1
                )));
            }
        }
        let index = self.traj.push(p);
        self.frontier.grow();
        if index == 0 {
            self.paths.seed();
            self.output.push(0);
        }
        Ok(())
    }

    /// Next committed point, if any.
    ///
    /// While open and with nothing buffered, one incremental search pass runs
    /// first. Returns `None` when no further output is provable yet.
    pub fn read_output(&mut self) -> Option<Point> {
        if self.state == SimplifierState::Open && self.read == self.output.len() {
            self.search(Mode::Incremental);
        }
        let &i = self.output.get(self.read)?;
        self.read += 1;
        self.traj.points().get(i).copied()
    }

    /// Close the stream and flush all remaining output. Idempotent.
    pub fn finish(&mut self) {
        if self.is_finished() {
            return;
        }
        self.state = SimplifierState::Finished;
        self.search(Mode::Finalize);
        info!(
            input = self.traj.len(),
            output = self.output.len(),
            layers = self.frontier.depth(),
            "finished"
        );
    }

    /// Drop every point and all output; configuration is kept.
    pub fn reset(&mut self) {
        *self = Self::with_cfg(self.cfg);
    }

    /// The `i`-th committed index in the original sequence.
    pub fn output_index(&self, i: usize) -> DotsResult<usize> {
        self.output
            .get(i)
            .copied()
            .ok_or(DotsError::IndexOutOfRange {
                index: i,
                len: self.output.len(),
            })
    }

    fn search(&mut self, mode: Mode) {
        if self.traj.is_empty() {
            return;
        }
        loop {
            if self.frontier.extend(&self.traj, &self.cfg) {
                self.swap();
                continue;
            }
            if mode == Mode::Incremental {
                break;
            }
            // Fed points exhausted without saturation: close the layer anyway.
            if self.frontier.vl().is_empty() {
                if !self.frontier.all_assigned() {
                    warn!(cursor = self.frontier.cursor(), "empty layer before the last point");
                }
                break;
            }
            self.swap();
            if self.frontier.all_assigned() {
                break;
            }
        }
        if mode == Mode::Finalize {
            self.decode_tail();
        }
    }

    fn swap(&mut self) {
        debug!(
            depth = self.frontier.depth(),
            vk = self.frontier.vk().len(),
            vl = self.frontier.vl().len(),
            terminated = self.frontier.num_terminated(),
            cursor = self.frontier.cursor(),
            "layer swap"
        );
        self.frontier.swap(&self.traj, &self.cfg);
        self.paths.advance(&self.frontier);
        self.paths.decode(&mut self.output);
    }

    /// Walk parent links from the last point back to the last committed
    /// index and append the reversed walk.
    fn decode_tail(&mut self) {
        let Some(&anchor) = self.output.last() else { return };
        let mut tail = Vec::new();
        let mut cur = self.traj.len() - 1;
        while cur > anchor {
            tail.push(cur);
            match self.frontier.node(cur).and_then(|n| n.parent) {
                Some(p) => cur = p,
                None => break,
            }
        }
        if cur != anchor {
            warn!(anchor, reached = cur, "tail walk missed the committed prefix");
        }
        tail.reverse();
        debug!(count = tail.len(), "decoded tail");
        self.output.extend(tail);
    }
}
