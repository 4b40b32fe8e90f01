// ABOUTME: Weighted document tree mirroring the markup tree, stored as an arena of nodes.
// ABOUTME: Builds nodes with their term models and computes per (tag, class) lexical weights.

//! Document tree used for content detection.
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`]. The
//! parent link is a lookup only; the tree is dropped as a whole.
//!
//! Lifecycle:
//! - [`DocumentTree::build`] mirrors the markup, skipping non-content elements.
//! - [`DocumentTree::prepare`] computes tag weights and flattens inline markup.
//! - The smearing pass then writes the final weight of every surviving node.

mod flatten;
mod smear;

use std::collections::HashMap;

use tracing::debug;

use crate::config::Config;
use crate::markup::MarkupNode;
use crate::terms::TermModel;

/// Elements that stay distinct nodes when the tree is flattened.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "div", "h1", "h2", "h3", "h4", "p", "form", "ul", "ol", "table", "title", "body", "img",
    "header",
];

/// Elements dropped with their subtree and tail while building.
pub const BANNED_ELEMENTS: &[&str] = &["script", "meta", "link", "style"];

/// Class key of nodes without a class-bearing ancestor.
pub const NO_CLASS: &str = "-";

pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag)
}

fn is_banned(tag: &str) -> bool {
    BANNED_ELEMENTS.contains(&tag)
}

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node of the document tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub tag: String,
    /// Own class attribute, or the nearest ancestor's.
    pub class_key: String,
    pub text: String,
    pub tail: String,
    /// Terms of the node's own text, scaled by its heaps weight once flattened.
    pub terms: TermModel,
    /// Unweighted copy of `terms`.
    pub raw: TermModel,
    pub heaps_weight: f64,
    pub html_weight: f64,
    pub content_weight: f64,
    pub weight: f64,
    /// Pre-order index among surviving nodes, set by flatten.
    pub position: usize,
    /// Upper bound of the detected content, identical on every node.
    pub end_content: f64,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl TreeNode {
    fn new(markup: &MarkupNode, class_key: String, parent: Option<NodeId>) -> Self {
        let mut terms = TermModel::new();
        terms.account_for(&markup.text);
        terms.account_for(&markup.tail);
        let raw = terms.clone();

        Self {
            tag: markup.tag.clone(),
            class_key,
            text: markup.text.clone(),
            tail: markup.tail.clone(),
            terms,
            raw,
            heaps_weight: 1.0,
            html_weight: 1.0,
            content_weight: 1.0,
            weight: 1.0,
            position: 0,
            end_content: 0.0,
            children: Vec::new(),
            parent,
        }
    }

    /// `tag:class` label used in the volume profile.
    pub fn label(&self) -> String {
        format!("{}:{}", self.tag, self.class_key)
    }
}

/// Lexical weight per `(tag, class_key)` group.
pub type TagWeights = HashMap<(String, String), f64>;

#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl DocumentTree {
    /// Mirrors a markup tree, dropping banned elements with their subtrees.
    ///
    /// Nodes are numbered in pre-order, the root being `NodeId(0)`.
    pub fn build(markup: &MarkupNode) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };

        let mut pending: Vec<(&MarkupNode, Option<NodeId>)> = vec![(markup, None)];
        while let Some((markup, parent)) = pending.pop() {
            let class_key = match markup.attr("class") {
                Some(class) if !class.is_empty() => class.to_string(),
                _ => match parent {
                    Some(parent) => tree.nodes[parent.0].class_key.clone(),
                    None => NO_CLASS.to_string(),
                },
            };

            let id = NodeId(tree.nodes.len());
            tree.nodes.push(TreeNode::new(markup, class_key, parent));
            if let Some(parent) = parent {
                tree.nodes[parent.0].children.push(id);
            }

            pending.extend(
                markup
                    .children
                    .iter()
                    .rev()
                    .filter(|child| !is_banned(&child.tag))
                    .map(|child| (child, Some(id))),
            );
        }
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// True if any ancestor of `id` currently carries `tag`.
    pub fn has_ancestor(&self, id: NodeId, tag: &str) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if self.nodes[parent.0].tag == tag {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Nodes reachable from the root, in pre-order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Weights the tree by lexical statistics and flattens inline markup.
    pub fn prepare(&mut self, config: &Config) {
        let weights = self.compute_tag_weights(config);
        debug!(groups = weights.len(), "computed tag weights");
        self.set_heaps_weights(&weights);
        self.flatten();
    }

    /// Groups every text and tail fragment by `(tag, class_key)` and weighs
    /// each group by its heaps weight times its numeric weight.
    ///
    /// Only groups holding at least one fragment get a weight; nodes of the
    /// other groups keep the neutral 1.0 in [`set_heaps_weights`](Self::set_heaps_weights).
    pub fn compute_tag_weights(&self, config: &Config) -> TagWeights {
        let mut groups: HashMap<(String, String), TermModel> = HashMap::new();
        for id in self.preorder() {
            let node = self.node(id);
            for fragment in [&node.text, &node.tail] {
                if fragment.is_empty() {
                    continue;
                }
                groups
                    .entry((node.tag.clone(), node.class_key.clone()))
                    .or_default()
                    .account_for(fragment);
            }
        }

        groups
            .into_iter()
            .map(|(key, terms)| {
                let weight =
                    terms.heaps_weight(&config.heaps) * terms.numeric_weight(&config.numeric);
                (key, weight)
            })
            .collect()
    }

    /// Copies each node's group weight onto its `heaps_weight`.
    pub fn set_heaps_weights(&mut self, weights: &TagWeights) {
        for id in self.preorder() {
            let node = &mut self.nodes[id.0];
            node.heaps_weight = weights
                .get(&(node.tag.clone(), node.class_key.clone()))
                .copied()
                .unwrap_or(1.0);
        }
    }
}
