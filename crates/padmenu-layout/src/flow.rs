#![forbid(unsafe_code)]

//! Horizontal flow container.
//!
//! Lays its children out left to right with fixed inter-child spacing,
//! centered horizontally in the reference window and anchored to a fixed
//! bottom margin. Width composes additively over children; height is
//! max-based. Either composition depends on the same child axis, so a
//! dirty child axis dirties the same container axis.

use padmenu_core::config::MenuMetrics;

use crate::{DirtyFlags, LayoutCache, LayoutEnv, LayoutNode};

/// Container that flows children horizontally.
pub struct FlowRow {
    cache: LayoutCache,
    metrics: MenuMetrics,
    children: Vec<Box<dyn LayoutNode>>,
}

impl FlowRow {
    /// Empty row with the given spacing metrics.
    #[must_use]
    pub fn new(metrics: MenuMetrics) -> Self {
        Self {
            cache: LayoutCache::new(),
            metrics,
            children: Vec::new(),
        }
    }

    /// Append a child, returning its slot index.
    ///
    /// Adding a child changes both the sum and the max composition, so both
    /// container axes are re-marked.
    pub fn add_child(&mut self, child: Box<dyn LayoutNode>) -> usize {
        self.children.push(child);
        self.cache.mark(DirtyFlags::all());
        self.children.len() - 1
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the row has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Immutable access to a child.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&dyn LayoutNode> {
        self.children.get(index).map(Box::as_ref)
    }

    /// Mutate a child through `f`, then propagate its dirty axes upward.
    ///
    /// This is the only mutable path to a child, which is what lets the
    /// container own the propagation rule: whatever axes `f` left dirty on
    /// the child are dirty on the container too before the next
    /// measurement.
    pub fn update_child(&mut self, index: usize, f: impl FnOnce(&mut dyn LayoutNode)) {
        if let Some(child) = self.children.get_mut(index) {
            f(child.as_mut());
            let child_dirty = child.cache().dirty();
            self.cache.mark(child_dirty);
        }
    }
}

impl LayoutNode for FlowRow {
    fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut LayoutCache {
        &mut self.cache
    }

    fn calc_width(&mut self) -> f32 {
        let gaps = self.children.len().saturating_sub(1) as f32;
        let content: f32 = self.children.iter_mut().map(|c| c.width()).sum();
        self.metrics.padding_x * 2.0 + self.metrics.spacing_x * gaps + content
    }

    fn calc_height(&mut self) -> f32 {
        let tallest = self
            .children
            .iter_mut()
            .map(|c| c.height())
            .fold(0.0, f32::max);
        tallest + self.metrics.padding_y * 2.0
    }

    fn do_layout(&mut self, env: &LayoutEnv) {
        let width = self.width();
        let origin_x = (env.window.width - width) * 0.5;
        let y = env.window.height - self.metrics.bottom_margin;
        self.set_position(origin_x, y);

        let mut x = origin_x + self.metrics.padding_x;
        for child in &mut self.children {
            child.set_position(x, y);
            child.do_layout(env);
            x += child.width() + self.metrics.spacing_x;
        }
    }
}
