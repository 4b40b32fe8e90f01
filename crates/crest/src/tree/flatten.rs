// ABOUTME: Flattening of the document tree: inline children are merged into their parent.
// ABOUTME: Block children survive, and a node keeping block children becomes a generic block itself.

use super::{is_block, DocumentTree, NodeId};
use crate::text::normalize_spaces;

/// Tag given to an inline node that keeps block children.
const GENERIC_BLOCK: &str = "div";

impl DocumentTree {
    /// Merges inline nodes into their parents, bottom-up, then numbers the
    /// surviving nodes in pre-order.
    ///
    /// Each node's terms are scaled by its heaps weight before its children
    /// are merged in, so merged terms keep the weight of their own group.
    pub fn flatten(&mut self) {
        let order = self.preorder();
        for &id in order.iter().rev() {
            self.flatten_node(id);
        }
        for (position, id) in self.preorder().into_iter().enumerate() {
            self.nodes[id.0].position = position;
        }
    }

    /// Merges the inline children of `id`, whose own children are already flattened.
    fn flatten_node(&mut self, id: NodeId) {
        let heaps_weight = self.nodes[id.0].heaps_weight;
        self.nodes[id.0].terms.scale_in_place(heaps_weight);

        let children = std::mem::take(&mut self.nodes[id.0].children);
        let mut survivors = Vec::with_capacity(children.len());
        let mut texts = Vec::new();

        for child in children {
            if is_block(&self.nodes[child.0].tag) {
                survivors.push(child);
                continue;
            }

            // The child is detached from here on; move its content out.
            let merged = &mut self.nodes[child.0];
            let text = normalize_spaces(&merged.text);
            let terms = std::mem::take(&mut merged.terms);
            let raw = std::mem::take(&mut merged.raw);

            let node = &mut self.nodes[id.0];
            node.terms.absorb(&terms);
            node.raw.absorb(&raw);
            texts.push(text);
        }

        let has_block = !survivors.is_empty();
        let node = &mut self.nodes[id.0];
        node.children = survivors;

        let children_text = normalize_spaces(&texts.join(" "));
        node.text.push_str(&children_text);
        let tail = node.tail.clone();
        node.text.push_str(&tail);

        if has_block && !is_block(&node.tag) {
            node.tag = GENERIC_BLOCK.to_string();
        }
    }
}
