//! One-shot reveal of elements as they scroll into view.
//!
//! [`RevealOnVisible`] keeps the per-target `revealed` flags and decides when a
//! visibility notification flips one. Style writes go through a
//! [`RevealSurface`] and the actual intersection tracking through a
//! [`VisibilityObserver`], so the same bookkeeping drives the browser's
//! `IntersectionObserver`, the scroll-polling fallback and the tests.

use serde::{Deserialize, Serialize};

use crate::visibility::EdgeMargin;

pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_EDGE_MARGIN: EdgeMargin = EdgeMargin::bottom(-50.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

pub trait RevealSurface<H> {
    fn apply(&mut self, handle: &H, state: RevealState);
}

pub trait VisibilityObserver<H> {
    fn observe(&mut self, handle: &H);
    fn unobserve(&mut self, handle: &H);
    fn disconnect(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub edge_margin: EdgeMargin,
}

impl RevealConfig {
    pub fn effective_threshold(&self) -> f64 {
        if self.threshold.is_finite() {
            self.threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_REVEAL_THRESHOLD
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REVEAL_THRESHOLD,
            edge_margin: DEFAULT_EDGE_MARGIN,
        }
    }
}

#[derive(Clone, Debug)]
pub struct VisibilityEntry<H> {
    pub handle: H,
    pub intersecting: bool,
    pub ratio: f64,
}

#[derive(Clone, Debug)]
pub struct RevealTarget<H> {
    pub handle: H,
    revealed: bool,
}

impl<H> RevealTarget<H> {
    pub fn revealed(&self) -> bool {
        self.revealed
    }
}

pub struct RevealOnVisible<H, S, O>
where
    S: RevealSurface<H>,
    O: VisibilityObserver<H>,
{
    targets: Vec<RevealTarget<H>>,
    threshold: f64,
    edge_margin: EdgeMargin,
    surface: S,
    observer: Option<O>,
}

impl<H, S, O> RevealOnVisible<H, S, O>
where
    H: PartialEq,
    S: RevealSurface<H>,
    O: VisibilityObserver<H>,
{
    pub fn attach<I>(targets: I, config: RevealConfig, mut surface: S, observer: O) -> Self
    where
        I: IntoIterator<Item = H>,
    {
        let targets: Vec<RevealTarget<H>> = targets
            .into_iter()
            .map(|handle| RevealTarget {
                handle,
                revealed: false,
            })
            .collect();
        let threshold = config.effective_threshold();
        if targets.is_empty() {
            return Self {
                targets,
                threshold,
                edge_margin: config.edge_margin,
                surface,
                observer: None,
            };
        }
        for target in &targets {
            surface.apply(&target.handle, RevealState::Hidden);
        }
        let mut observer = observer;
        for target in &targets {
            observer.observe(&target.handle);
        }
        Self {
            targets,
            threshold,
            edge_margin: config.edge_margin,
            surface,
            observer: Some(observer),
        }
    }

    /// Applies a batch of notifications and returns how many targets were
    /// revealed by it.
    pub fn on_visibility<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = VisibilityEntry<H>>,
    {
        let Some(observer) = self.observer.as_mut() else {
            return 0;
        };
        let mut revealed = 0;
        for entry in entries {
            if !entry.intersecting || entry.ratio < self.threshold {
                continue;
            }
            let Some(target) = self
                .targets
                .iter_mut()
                .find(|target| target.handle == entry.handle)
            else {
                continue;
            };
            if target.revealed {
                continue;
            }
            target.revealed = true;
            self.surface.apply(&target.handle, RevealState::Revealed);
            observer.unobserve(&target.handle);
            revealed += 1;
        }
        revealed
    }

    /// Drops a target whose element left the document.
    pub fn forget(&mut self, handle: &H) {
        let Some(pos) = self.targets.iter().position(|target| &target.handle == handle) else {
            return;
        };
        let target = self.targets.remove(pos);
        if !target.revealed {
            if let Some(observer) = self.observer.as_mut() {
                observer.unobserve(&target.handle);
            }
        }
    }

    pub fn is_revealed(&self, handle: &H) -> Option<bool> {
        self.targets
            .iter()
            .find(|target| &target.handle == handle)
            .map(|target| target.revealed)
    }
}

impl<H, S, O> RevealOnVisible<H, S, O>
where
    S: RevealSurface<H>,
    O: VisibilityObserver<H>,
{
    pub fn detach(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
        }
        self.targets.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.observer.is_some()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn edge_margin(&self) -> EdgeMargin {
        self.edge_margin
    }

    pub fn targets(&self) -> &[RevealTarget<H>] {
        &self.targets
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.targets.iter().filter(|target| target.revealed).count()
    }

    pub fn all_revealed(&self) -> bool {
        self.targets.iter().all(|target| target.revealed)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<H, S, O> Drop for RevealOnVisible<H, S, O>
where
    S: RevealSurface<H>,
    O: VisibilityObserver<H>,
{
    fn drop(&mut self) {
        self.detach();
    }
}
