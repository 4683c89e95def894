//! Tree nodes and the local restructuring primitives
//!
//! Everything here works on one node and at most its two children, and
//! returns the new local root for the caller to graft back in place.

use std::cmp::Ordering;

use super::Contact;

/// Owned, optional subtree
pub(crate) type Link = Option<Box<Node>>;

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) contact: Contact,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// Height of the subtree rooted here; a leaf is 1
    pub(crate) height: usize,
}

impl Node {
    pub(crate) fn leaf(contact: Contact) -> Box<Self> {
        Box::new(Self {
            contact,
            left: None,
            right: None,
            height: 1,
        })
    }

    pub(crate) fn key(&self) -> &str {
        &self.contact.name
    }

    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(left) - height(right)`
    pub(crate) fn balance(&self) -> i64 {
        height(&self.left) as i64 - height(&self.right) as i64
    }
}

/// Height of a possibly empty subtree
pub(crate) fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance_of(link: &Link) -> i64 {
    link.as_ref().map_or(0, |n| n.balance())
}

// =============================================================================
// Rotations
// =============================================================================

/// Promote `node.right` to local root.
///
/// ```text
///     x                y
///      \              / \
///       y     =>     x   c
///      / \            \
///     b   c            b
/// ```
pub(crate) fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Promote `node.left` to local root (mirror of `rotate_left`).
pub(crate) fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

fn rotate_left_right(mut node: Box<Node>) -> Box<Node> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

fn rotate_right_left(mut node: Box<Node>) -> Box<Node> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

// =============================================================================
// Rebalancing
// =============================================================================

/// Restore balance on the way back up from an insert of `key`.
///
/// The case is chosen by where the new key landed relative to the heavy
/// child. At most one (single or double) rotation fires.
pub(crate) fn rebalance_after_insert(mut node: Box<Node>, key: &str) -> Box<Node> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        let heavy = node.left.as_ref().map(|l| key.cmp(l.key()));
        return match heavy {
            Some(Ordering::Less) => rotate_right(node),
            Some(Ordering::Greater) => rotate_left_right(node),
            _ => node,
        };
    }

    if balance < -1 {
        let heavy = node.right.as_ref().map(|r| key.cmp(r.key()));
        return match heavy {
            Some(Ordering::Greater) => rotate_left(node),
            Some(Ordering::Less) => rotate_right_left(node),
            _ => node,
        };
    }

    node
}

/// Restore balance on the way back up from a removal.
///
/// The removed key is gone, so the case is chosen by the balance factor of
/// the heavy child instead of by key comparison.
pub(crate) fn rebalance_after_delete(mut node: Box<Node>) -> Box<Node> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        return if balance_of(&node.left) >= 0 {
            rotate_right(node)
        } else {
            rotate_left_right(node)
        };
    }

    if balance < -1 {
        return if balance_of(&node.right) <= 0 {
            rotate_left(node)
        } else {
            rotate_right_left(node)
        };
    }

    node
}
