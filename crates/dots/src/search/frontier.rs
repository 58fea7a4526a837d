//! Layered frontier of the implicit DAG.
//!
//! Nodes live in a dense arena indexed by point index; parent links are plain
//! indices and always point backwards. `vk` is the layer offering candidate
//! parents, `vl` the layer under construction. Both are sorted ascending and
//! disjoint.

use tracing::trace;

use crate::lssd::TrajectoryBuffer;
use crate::types::DotsCfg;

/// A point that has been reached by the search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// `None` only for the root (index 0).
    pub parent: Option<usize>,
    /// Sum of LSSD along the parent chain.
    pub cost: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Frontier {
    /// One slot per fed point; `None` while unassigned.
    nodes: Vec<Option<Node>>,
    vk: Vec<usize>,
    terminated: Vec<bool>,
    num_terminated: usize,
    vl: Vec<usize>,
    /// Smallest unassigned index.
    cursor: usize,
    /// Next index to scan against the current `vk`.
    scan: usize,
    depth: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more fed point. The first one becomes the root and the
    /// sole member of the initial layer.
    pub fn grow(&mut self) {
        if self.nodes.is_empty() {
            self.nodes.push(Some(Node {
                parent: None,
                cost: 0.0,
            }));
            self.vk = vec![0];
            self.terminated = vec![false];
            self.cursor = 1;
            self.scan = 1;
        } else {
            self.nodes.push(None);
        }
    }

    #[inline]
    pub fn node(&self, i: usize) -> Option<Node> {
        self.nodes.get(i).copied().flatten()
    }
    #[inline]
    pub fn vk(&self) -> &[usize] {
        &self.vk
    }
    #[inline]
    pub fn vl(&self) -> &[usize] {
        &self.vl
    }
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }
    #[inline]
    pub fn num_terminated(&self) -> usize {
        self.num_terminated
    }
    /// Every fed point has a parent (or is the root).
    #[inline]
    pub fn all_assigned(&self) -> bool {
        self.cursor >= self.nodes.len()
    }

    /// Scan unassigned points against `vk` until the layer saturates or the
    /// fed points run out. Returns `true` on saturation.
    ///
    /// Each point takes the first live member whose chord error is under the
    /// threshold. A member whose error exceeds the termination bound is
    /// retired for the rest of the layer.
    pub fn extend(&mut self, traj: &TrajectoryBuffer, cfg: &DotsCfg) -> bool {
        let n = traj.len().min(self.nodes.len());
        let threshold = cfg.error_threshold;
        let bound = cfg.termination_bound();
        while self.scan < n {
            let i = self.scan;
            self.scan += 1;
            if self.nodes[i].is_some() {
                continue;
            }
            for slot in 0..self.vk.len() {
                if self.terminated[slot] {
                    continue;
                }
                let j = self.vk[slot];
                if j >= i {
                    continue;
                }
                let d = traj.lssd_unchecked(j, i);
                if d < threshold {
                    let cost = self.cost_of(j) + d;
                    self.nodes[i] = Some(Node {
                        parent: Some(j),
                        cost,
                    });
                    self.vl.push(i);
                    trace!(point = i, parent = j, lssd = d, "assigned");
                    break;
                }
                if d > bound {
                    self.terminated[slot] = true;
                    self.num_terminated += 1;
                }
            }
            while self.cursor < n && self.nodes[self.cursor].is_some() {
                self.cursor += 1;
            }
            if self.is_saturated(cfg) {
                return true;
            }
        }
        false
    }

    #[inline]
    fn is_saturated(&self, cfg: &DotsCfg) -> bool {
        self.num_terminated == self.vk.len() || self.vl.len() >= cfg.max_frontier_width
    }

    #[inline]
    fn cost_of(&self, i: usize) -> f64 {
        self.nodes[i].map_or(0.0, |n| n.cost)
    }

    /// Promote `vl` to `vk`.
    ///
    /// Members past the first unassigned index are released first so every
    /// layer stays a contiguous index range. Each remaining member then takes
    /// the `vk` parent minimizing accumulated cost among valid chords.
    pub fn swap(&mut self, traj: &TrajectoryBuffer, cfg: &DotsCfg) {
        let cursor = self.cursor;
        let released: Vec<usize> = self.vl.iter().copied().filter(|&v| v > cursor).collect();
        for &v in &released {
            self.nodes[v] = None;
        }
        self.vl.retain(|&v| v < cursor);
        if !released.is_empty() {
            trace!(count = released.len(), cursor, "released past gap");
        }

        for &v in &self.vl {
            let Some(node) = self.nodes[v] else { continue };
            let mut best = node;
            for &j in &self.vk {
                if j >= v {
                    break;
                }
                let d = traj.lssd_unchecked(j, v);
                if d >= cfg.error_threshold {
                    continue;
                }
                let cost = self.cost_of(j) + d;
                if cost < best.cost {
                    best = Node {
                        parent: Some(j),
                        cost,
                    };
                }
            }
            self.nodes[v] = Some(best);
        }

        self.vk = std::mem::take(&mut self.vl);
        self.terminated.clear();
        self.terminated.resize(self.vk.len(), false);
        self.num_terminated = 0;
        self.scan = self.cursor;
        self.depth += 1;
    }
}
