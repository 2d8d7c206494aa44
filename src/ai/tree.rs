//! Labelled N-ary game tree with bottom-up minimax propagation.
//!
//! Nodes live in an [`ego_tree`] arena and are addressed by [`NodeId`]; a
//! parent owns its children and the tree never shares a node. The label of a
//! node is the move leading to it, the root has none.

use std::collections::BTreeMap;
use std::fmt::Display;

use ego_tree::{NodeId, NodeRef, Tree};

/// Which extremum a node takes over its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Max,
    Min,
}

impl Sign {
    pub fn flip(self) -> Sign {
        match self {
            Sign::Max => Sign::Min,
            Sign::Min => Sign::Max,
        }
    }

    /// Strict improvement, so ties keep the earlier candidate.
    fn improves(self, candidate: f64, best: f64) -> bool {
        match self {
            Sign::Max => candidate > best,
            Sign::Min => candidate < best,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode<L> {
    pub label: Option<L>,
    /// Leaf score, or the minimax value once propagated.
    pub value: Option<f64>,
    /// Label of the first child attaining `value`.
    pub best: Option<L>,
}

/// One entry of a [`SearchTree::export`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Subtree {
    pub v: Option<f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub c: BTreeMap<String, Subtree>,
}

/// Label of the root node in an export.
pub const ROOT_KEY: &str = "root";

#[derive(Debug, Clone)]
pub struct SearchTree<L> {
    tree: Tree<SearchNode<L>>,
}

impl<L: Clone> SearchTree<L> {
    pub fn new() -> Self {
        SearchTree {
            tree: Tree::new(SearchNode {
                label: None,
                value: None,
                best: None,
            }),
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    fn node_ref(&self, id: NodeId) -> NodeRef<'_, SearchNode<L>> {
        self.tree
            .get(id)
            .unwrap_or_else(|| panic!("node {id:?} does not belong to this tree"))
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<L> {
        self.node_ref(id).value()
    }

    /// Append a child under `parent`, after any existing children.
    pub fn add_child(&mut self, parent: NodeId, label: L, value: Option<f64>) -> NodeId {
        let mut parent = self
            .tree
            .get_mut(parent)
            .unwrap_or_else(|| panic!("node {parent:?} does not belong to this tree"));
        parent
            .append(SearchNode {
                label: Some(label),
                value,
                best: None,
            })
            .id()
    }

    pub fn set_value(&mut self, id: NodeId, value: f64) {
        let mut node = self
            .tree
            .get_mut(id)
            .unwrap_or_else(|| panic!("node {id:?} does not belong to this tree"));
        node.value().value = Some(value);
    }

    pub fn value(&self, id: NodeId) -> Option<f64> {
        self.node(id).value
    }

    pub fn label(&self, id: NodeId) -> Option<&L> {
        self.node(id).label.as_ref()
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node_ref(id).children().map(|child| child.id()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.tree.nodes().count()
    }

    pub fn leaf_count(&self) -> usize {
        self.tree.nodes().filter(|node| !node.has_children()).count()
    }

    /// Compute the minimax value of `id`, caching it (and the label of the
    /// winning child) on every inner node visited.
    ///
    /// # Panics
    ///
    /// Panics if a leaf below `id` was never given a value.
    pub fn minimax(&mut self, id: NodeId, sign: Sign) -> f64 {
        let children = self.children(id);
        if children.is_empty() {
            return self
                .value(id)
                .unwrap_or_else(|| panic!("leaf {id:?} has no assigned value"));
        }

        let mut best: Option<(f64, Option<L>)> = None;
        for child in children {
            let value = self.minimax(child, sign.flip());
            let improves = match &best {
                None => true,
                Some((best_value, _)) => sign.improves(value, *best_value),
            };
            if improves {
                best = Some((value, self.node(child).label.clone()));
            }
        }

        let (value, label) = best.unwrap_or_else(|| unreachable!("node has children"));
        let mut node = self
            .tree
            .get_mut(id)
            .unwrap_or_else(|| panic!("node {id:?} does not belong to this tree"));
        let node = node.value();
        node.value = Some(value);
        node.best = label;
        value
    }

    /// Label recorded by the last [`minimax`](Self::minimax) pass over `id`.
    pub fn best_label(&self, id: NodeId) -> Option<&L> {
        self.node(id).best.as_ref()
    }
}

impl<L: Clone + PartialEq> SearchTree<L> {
    /// The child of `id` carrying its best label.
    pub fn best_child(&self, id: NodeId) -> Option<NodeId> {
        let best = self.best_label(id)?;
        self.node_ref(id)
            .children()
            .find(|child| child.value().label.as_ref() == Some(best))
            .map(|child| child.id())
    }
}

impl<L: Clone + Display> SearchTree<L> {
    /// Flatten the live tree into a label-keyed map, recomputed on each call.
    ///
    /// `max_depth` bounds how many levels of children are included; `None`
    /// includes everything.
    pub fn export(&self, max_depth: Option<usize>) -> BTreeMap<String, Subtree> {
        let root = self.tree.root();
        let mut map = BTreeMap::new();
        map.insert(ROOT_KEY.to_string(), Self::subtree(root, max_depth));
        map
    }

    fn subtree(node: NodeRef<'_, SearchNode<L>>, depth: Option<usize>) -> Subtree {
        let mut c = BTreeMap::new();
        if depth != Some(0) {
            let next = depth.map(|d| d - 1);
            for child in node.children() {
                let key = match &child.value().label {
                    Some(label) => label.to_string(),
                    None => ROOT_KEY.to_string(),
                };
                c.insert(key, Self::subtree(child, next));
            }
        }
        Subtree {
            v: node.value().value,
            c,
        }
    }
}

impl<L: Clone> Default for SearchTree<L> {
    fn default() -> Self {
        Self::new()
    }
}
