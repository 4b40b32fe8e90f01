// ABOUTME: Final weighting of the flattened tree from detected intervals and static tag priors.
// ABOUTME: Also extracts the volume profile fed to the detector and the weighted sentences.

use super::{DocumentTree, NodeId};
use crate::config::Config;
use crate::intervals::IntervalMap;
use crate::result::{ProfileEntry, Sentence};
use crate::terms::TermModel;

impl DocumentTree {
    /// Volume of every surviving node, in pre-order.
    pub fn volume_profile(&self) -> Vec<ProfileEntry> {
        self.preorder()
            .into_iter()
            .map(|id| {
                let node = self.node(id);
                ProfileEntry {
                    label: node.label(),
                    volume: node.terms.volume(),
                }
            })
            .collect()
    }

    /// Sets each node's content weight to the interval weight at its
    /// position, floored at `epsilon`, and records the end of the content.
    pub fn apply_content_weight(&mut self, intervals: &IntervalMap, epsilon: f64) {
        let end_content = intervals.end();
        for id in self.preorder() {
            let node = &mut self.nodes[id.0];
            node.end_content = end_content;
            node.content_weight = intervals.weight_at(node.position as f64).max(epsilon);
        }
    }

    /// Computes the final weight of every node and folds each node's terms,
    /// scaled by that weight, into `page`.
    ///
    /// A tag prior replaces the content weight when it differs from 1.0.
    /// Priors above 1.0 only hold up to the end of the detected content, and
    /// a `title` inside `body` gets no prior.
    pub fn smear(&mut self, config: &Config, page: &mut TermModel) {
        let order = self.preorder();
        for &id in &order {
            self.weigh_node(id, config, page);
        }
        // Children come after their parent in pre-order, so walking it
        // backwards folds every subtree before its root.
        for &id in order.iter().rev() {
            for i in 0..self.nodes[id.0].children.len() {
                let child = self.nodes[id.0].children[i];
                let raw = std::mem::take(&mut self.nodes[child.0].raw);
                self.nodes[id.0].raw.absorb(&raw);
                self.nodes[child.0].raw = raw;
            }
        }
    }

    fn weigh_node(&mut self, id: NodeId, config: &Config, page: &mut TermModel) {
        let mut html_weight = config.html_weight(&self.nodes[id.0].tag);
        if self.nodes[id.0].tag == "title" && self.has_ancestor(id, "body") {
            html_weight = 1.0;
        }

        let node = &mut self.nodes[id.0];
        node.html_weight = html_weight;

        let mut weight = html_weight;
        if weight > 1.0 && node.position as f64 > node.end_content {
            weight = 1.0;
        }
        if weight == 1.0 {
            weight = node.content_weight;
        }
        node.weight = weight;
        page.absorb(&node.terms.scale(weight));
    }

    /// Trimmed text and weight of every node weighing strictly more than `threshold`.
    pub fn sentences(&self, threshold: f64) -> Vec<Sentence> {
        self.preorder()
            .into_iter()
            .map(|id| self.node(id))
            .filter(|node| node.weight > threshold)
            .map(|node| Sentence::new(node.text.trim(), node.weight))
            .collect()
    }
}
