#![forbid(unsafe_code)]

//! Incremental layout measurement with dirty-bit invalidation.
//!
//! A [`LayoutNode`] owns a cached width and height guarded by a two-bit
//! dirty mask. A dimension is recomputed if and only if its bit is set;
//! after recomputation the bit is cleared and the cached value is
//! authoritative until a mutation re-marks it. Measurement is synchronous
//! and single-threaded: it runs to completion before the render pass of
//! the same frame, so no reader can observe a half-updated cache.
//!
//! # Invariants
//!
//! 1. **Exact recomputation**: `width()` invokes `calc_width()` exactly
//!    once per dirty marking, never on a clean cache. Same for the height
//!    axis.
//! 2. **Axis independence**: the width and height caches never share a
//!    slot or a computation. `height()` goes through `calc_height()` and
//!    the height slot only.
//! 3. **Propagation before measurement**: every mutation that can change a
//!    node's intrinsic size marks the affected axes on the node and on any
//!    ancestor whose cached size depends on them, before the next
//!    measurement begins. Concrete node kinds own this rule, since it
//!    depends on how the axis composes (additive, max-based, or fixed).

pub mod fixed;
pub mod flow;

pub use fixed::FixedNode;
pub use flow::FlowRow;
pub use padmenu_core::config::{MenuMetrics, WindowSize};

use bitflags::bitflags;

bitflags! {
    /// Per-axis staleness marks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// Cached width is stale.
        const WIDTH  = 0b01;
        /// Cached height is stale.
        const HEIGHT = 0b10;
    }
}

/// Cached geometry for one node: dimensions, absolute position, dirty mask.
///
/// Both dirty bits are set at construction, so the first measurement always
/// computes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCache {
    width: f32,
    height: f32,
    x: f32,
    y: f32,
    dirty: DirtyFlags,
}

impl LayoutCache {
    /// Fresh cache: zero geometry, both axes dirty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            x: 0.0,
            y: 0.0,
            dirty: DirtyFlags::all(),
        }
    }

    /// Current dirty mask.
    #[must_use]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark the given axes stale.
    pub fn mark(&mut self, flags: DirtyFlags) {
        self.dirty.insert(flags);
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment a layout pass runs against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEnv {
    /// Reference window the tree is positioned within.
    pub window: WindowSize,
}

/// A positionable rectangle with memoized dimensions.
///
/// Implementors supply the axis computations (`calc_width`, `calc_height`)
/// and the positioning pass (`do_layout`); the caching getters are provided
/// and must not be overridden.
pub trait LayoutNode {
    /// The node's cache slot.
    fn cache(&self) -> &LayoutCache;

    /// The node's cache slot, mutable.
    fn cache_mut(&mut self) -> &mut LayoutCache;

    /// Compute the intrinsic width. Total over valid node state.
    fn calc_width(&mut self) -> f32;

    /// Compute the intrinsic height. Total over valid node state.
    fn calc_height(&mut self) -> f32;

    /// Assign absolute positions to this node (and children, if any).
    fn do_layout(&mut self, env: &LayoutEnv);

    /// Cached width, recomputing only if the WIDTH bit is set.
    fn width(&mut self) -> f32 {
        if self.cache().dirty.contains(DirtyFlags::WIDTH) {
            self.cache_mut().dirty.remove(DirtyFlags::WIDTH);
            let w = self.calc_width();
            self.cache_mut().width = w;
        }
        self.cache().width
    }

    /// Cached height, recomputing only if the HEIGHT bit is set.
    fn height(&mut self) -> f32 {
        if self.cache().dirty.contains(DirtyFlags::HEIGHT) {
            self.cache_mut().dirty.remove(DirtyFlags::HEIGHT);
            let h = self.calc_height();
            self.cache_mut().height = h;
        }
        self.cache().height
    }

    /// Mark the given axes stale on this node.
    fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.cache_mut().mark(flags);
    }

    /// Absolute position assigned by the last layout pass.
    fn position(&self) -> (f32, f32) {
        let c = self.cache();
        (c.x, c.y)
    }

    /// Assign an absolute position.
    fn set_position(&mut self, x: f32, y: f32) {
        let c = self.cache_mut();
        c.x = x;
        c.y = y;
    }
}
