//! Tree rotations.
//!
//! Left and right rotations are mirror images, so both are generated from a
//! single body. Rotations rewrite parent/child links only; colors are left to
//! the fix-up passes and the entry list is never touched.

use crate::types::{NodeId, RbMap, LEAF, NULL_NODE};

/// Generates `rotate_<dir>(pivot)`, which moves `pivot` down towards `<dir>`
/// and lifts its `<lifted>` child into its place.
macro_rules! rotation {
    ($dir:ident, lifted: $lifted:ident, inner: $inner:ident) => {
        paste::paste! {
            #[doc = "Rotates `pivot` down to the " $dir ", lifting its " $lifted " child."]
            pub(crate) fn [<rotate_ $dir>](&mut self, pivot: NodeId) {
                let lifted = self.pool.node(pivot).$lifted;
                debug_assert!(lifted != LEAF, "cannot rotate a leaf into place");
                let inner = self.pool.node(lifted).$inner;
                let parent = self.pool.node(pivot).parent;

                self.pool.node_mut(pivot).$lifted = inner;
                if inner != LEAF {
                    self.pool.node_mut(inner).parent = pivot;
                }

                self.pool.node_mut(lifted).parent = parent;
                self.replace_child(parent, pivot, lifted);

                self.pool.node_mut(lifted).$inner = pivot;
                self.pool.node_mut(pivot).parent = lifted;
            }
        }
    };
}

impl<K, V> RbMap<K, V> {
    rotation!(left, lifted: right, inner: left);
    rotation!(right, lifted: left, inner: right);

    /// Point `parent`'s link that referenced `old` at `new` instead.
    /// A `NULL_NODE` parent means `old` was the root.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent == NULL_NODE {
            self.root = new;
        } else if self.pool.node(parent).left == old {
            self.pool.node_mut(parent).left = new;
        } else {
            self.pool.node_mut(parent).right = new;
        }
    }
}
