#![forbid(unsafe_code)]

//! Fixed-size leaf node.

use crate::{DirtyFlags, LayoutCache, LayoutEnv, LayoutNode};

/// A leaf with constant intrinsic dimensions, set at construction.
///
/// Menu buttons use one of these per entry; the dimensions come from the
/// button spec, not from content measurement.
#[derive(Debug)]
pub struct FixedNode {
    cache: LayoutCache,
    width: f32,
    height: f32,
}

impl FixedNode {
    /// Create a leaf with the given footprint.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            cache: LayoutCache::new(),
            width,
            height,
        }
    }

    /// Change the footprint, re-marking only the axes that changed.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width != self.width {
            self.width = width;
            self.cache.mark(DirtyFlags::WIDTH);
        }
        if height != self.height {
            self.height = height;
            self.cache.mark(DirtyFlags::HEIGHT);
        }
    }
}

impl LayoutNode for FixedNode {
    fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut LayoutCache {
        &mut self.cache
    }

    fn calc_width(&mut self) -> f32 {
        self.width
    }

    fn calc_height(&mut self) -> f32 {
        self.height
    }

    fn do_layout(&mut self, _env: &LayoutEnv) {}
}
