//! Conversion trees: the recorded history of clause expansion.
//!
//! Every clause builder produced during verification is wrapped in a tree
//! node, so the whole reduction can be replayed afterwards. Nodes live in an
//! arena owned by the [`ConversionTree`]; [`NodeRef`] handles index into it
//! and the parent back-reference exists for reporting only.
//!
//! Each node carries a structural [`NodeId`]: the root's is empty and every
//! step appends `0` for a left child or `1` for a right child, so the
//! identifier is the path from the root.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use crate::clause::ClauseBuilder;

/// Handle to a node inside a [`ConversionTree`].
///
/// Handles are minted by [`ConversionTree::add_leaf`] and are only meaningful
/// for the tree that produced them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeRef(usize);

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Structural path identifier of a tree node.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct NodeId(Vec<u8>);

impl NodeId {
    const LEFT: u8 = 0;
    const RIGHT: u8 = 1;

    /// The root identifier (empty path).
    pub fn root() -> Self {
        NodeId::default()
    }

    fn child(&self, direction: u8) -> NodeId {
        let mut path = self.0.clone();
        path.push(direction);
        NodeId(path)
    }

    /// The 0/1 steps from the root to this node.
    pub fn path(&self) -> &[u8] {
        &self.0
    }

    /// Depth of the node; the root is at depth 0.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for NodeId {
    /// Renders as `C` followed by the path digits, e.g. `C010`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C")?;
        for step in &self.0 {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// One recorded clause snapshot. Immutable after creation.
#[derive(Debug)]
pub struct TreeNode {
    clause: ClauseBuilder,
    id: NodeId,
    parent: Option<NodeRef>,
    children: [Option<NodeRef>; 2],
}

impl TreeNode {
    pub fn clause(&self) -> &ClauseBuilder {
        &self.clause
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.parent
    }

    /// Present children, left before right.
    pub fn children(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.children.iter().flatten().copied()
    }
}

/// Violation of the tree-building protocol. A caller bug, not a runtime
/// condition to retry.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StructureError {
    /// A second root was offered to a tree that already has one.
    RootAlreadySet,
    /// The named parent does not belong to this tree.
    ParentNotInTree,
    /// The node is already attached to this tree. Named for protocol
    /// completeness: handles are only minted by [`ConversionTree::add_leaf`],
    /// so the safe API cannot actually produce this case.
    NodeAlreadyInTree,
    /// The parent already has both children.
    ParentAlreadyHasTwoChildren,
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::RootAlreadySet => write!(f, "root already set"),
            StructureError::ParentNotInTree => write!(f, "parent not in tree"),
            StructureError::NodeAlreadyInTree => write!(f, "node already in tree"),
            StructureError::ParentAlreadyHasTwoChildren => {
                write!(f, "parent already has two children")
            }
        }
    }
}

impl Error for StructureError {}

/// Binary tree of clause snapshots with breadth-first traversal.
#[derive(Debug, Default)]
pub struct ConversionTree {
    nodes: Vec<TreeNode>,
}

impl ConversionTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        ConversionTree::default()
    }

    /// Creates a tree whose root wraps the given clause.
    pub fn with_root(clause: ClauseBuilder) -> Self {
        ConversionTree {
            nodes: vec![TreeNode {
                clause,
                id: NodeId::root(),
                parent: None,
                children: [None, None],
            }],
        }
    }

    /// Returns the root handle, if the tree is non-empty.
    pub fn root(&self) -> Option<NodeRef> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeRef(0))
        }
    }

    /// Attaches a new leaf wrapping `clause`.
    ///
    /// Without a parent the leaf becomes the root (only once). With a parent,
    /// the parent must belong to this tree and have a free child slot; the
    /// leaf fills the left slot first, then the right. Returns the handle of
    /// the new node.
    pub fn add_leaf(
        &mut self,
        clause: ClauseBuilder,
        parent: Option<NodeRef>,
    ) -> Result<NodeRef, StructureError> {
        let Some(parent) = parent else {
            if !self.nodes.is_empty() {
                return Err(StructureError::RootAlreadySet);
            }
            self.nodes.push(TreeNode {
                clause,
                id: NodeId::root(),
                parent: None,
                children: [None, None],
            });
            return Ok(NodeRef(0));
        };

        if !self.contains(parent) {
            return Err(StructureError::ParentNotInTree);
        }
        let slot = match self.nodes[parent.0].children {
            [None, _] => NodeId::LEFT,
            [_, None] => NodeId::RIGHT,
            _ => return Err(StructureError::ParentAlreadyHasTwoChildren),
        };

        let node = NodeRef(self.nodes.len());
        let id = self.nodes[parent.0].id.child(slot);
        self.nodes.push(TreeNode {
            clause,
            id,
            parent: Some(parent),
            children: [None, None],
        });
        self.nodes[parent.0].children[slot as usize] = Some(node);
        Ok(node)
    }

    /// Membership test for a handle.
    pub fn contains(&self, node: NodeRef) -> bool {
        node.0 < self.nodes.len()
    }

    /// Looks a node up by handle.
    pub fn get(&self, node: NodeRef) -> Option<&TreeNode> {
        self.nodes.get(node.0)
    }

    /// Looks a node up by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this tree.
    pub fn node(&self, node: NodeRef) -> &TreeNode {
        &self.nodes[node.0]
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Breadth-first traversal, left child before right child at each level.
    pub fn bfs(&self) -> Bfs<'_> {
        let mut queue = VecDeque::new();
        queue.extend(self.root());
        Bfs { tree: self, queue }
    }
}

/// Queue-based breadth-first iterator over a [`ConversionTree`].
#[derive(Debug)]
pub struct Bfs<'a> {
    tree: &'a ConversionTree,
    queue: VecDeque<NodeRef>,
}

impl Iterator for Bfs<'_> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(self.tree.node(node).children());
        Some(node)
    }
}
