//! Stable-prefix decode over the current layer.
//!
//! Every `vk` member keeps its ancestry from the last committed index. When
//! all members agree on the next position, every future decode passes
//! through it, so it can be committed and never revisited.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::frontier::Frontier;

#[derive(Clone, Debug, Default)]
pub struct PathTracker {
    /// Mirrors the `vk` the paths were built for (ascending).
    members: Vec<usize>,
    /// `paths[k]` runs from the last committed index to `members[k]`.
    paths: Vec<VecDeque<usize>>,
}

impl PathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the root, which is committed on ingestion.
    pub fn seed(&mut self) {
        self.members = vec![0];
        self.paths = vec![VecDeque::from([0])];
    }

    #[inline]
    pub fn paths(&self) -> &[VecDeque<usize>] {
        &self.paths
    }

    /// Rebuild paths for the freshly swapped `vk`: parent's path plus the node.
    /// Paths of members without children are dropped.
    pub fn advance(&mut self, frontier: &Frontier) {
        let mut members = Vec::with_capacity(frontier.vk().len());
        let mut paths = Vec::with_capacity(frontier.vk().len());
        for &v in frontier.vk() {
            let parent = frontier.node(v).and_then(|n| n.parent);
            let slot = parent.and_then(|p| self.members.binary_search(&p).ok());
            let Some(k) = slot else {
                warn!(node = v, ?parent, "parent outside previous layer; path dropped");
                continue;
            };
            let mut path = self.paths[k].clone();
            path.push_back(v);
            members.push(v);
            paths.push(path);
        }
        self.members = members;
        self.paths = paths;
    }

    /// Commit every position shared by all paths into `out`. Returns the
    /// number of committed indices.
    pub fn decode(&mut self, out: &mut Vec<usize>) -> usize {
        let mut committed = 0;
        loop {
            let Some(first) = self.paths.first() else { break };
            let Some(&next) = first.get(1) else { break };
            if !self.paths.iter().all(|p| p.get(1) == Some(&next)) {
                break;
            }
            for p in &mut self.paths {
                p.pop_front();
            }
            out.push(next);
            committed += 1;
        }
        if committed > 0 {
            debug!(committed, last = out.last().copied(), "stable prefix");
        }
        committed
    }
}
