//! ContactIndex implementation
//!
//! AVL tree keyed by contact name.

use std::cmp::Ordering;

use super::node::{height, rebalance_after_delete, rebalance_after_insert, Link, Node};
use super::{Contact, DeleteOutcome, InsertOutcome, InvariantViolation, UpdateOutcome};

/// Ordered index of contacts
///
/// After every public method returns:
/// - keys are strictly ascending in-order (no duplicates)
/// - every node's subtrees differ in height by at most one
/// - every cached height equals `1 + max(child heights)`
#[derive(Debug, Default)]
pub struct ContactIndex {
    root: Link,
    len: usize,
}

impl ContactIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a contact unless its name is already present.
    ///
    /// An existing entry is never replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        number: impl Into<String>,
        group: impl Into<String>,
    ) -> InsertOutcome {
        self.insert_contact(Contact::new(name, number, group))
    }

    /// Insert an already built contact. See [`ContactIndex::insert`].
    pub fn insert_contact(&mut self, contact: Contact) -> InsertOutcome {
        let key = contact.name.clone();
        let mut outcome = InsertOutcome::AlreadyExists;
        self.root = Some(Self::insert_node(self.root.take(), &key, contact, &mut outcome));
        if outcome == InsertOutcome::Inserted {
            self.len += 1;
        }
        outcome
    }

    /// Overwrite the number of an existing contact. The shape never changes.
    pub fn update_number(&mut self, name: &str, number: impl Into<String>) -> UpdateOutcome {
        match self.get_mut(name) {
            Some(contact) => {
                contact.number = number.into();
                UpdateOutcome::Updated
            }
            None => UpdateOutcome::NotFound,
        }
    }

    /// Remove a contact by name.
    ///
    /// A node with two children keeps its position and takes over the full
    /// payload of its in-order successor, which is then unlinked.
    pub fn remove(&mut self, name: &str) -> DeleteOutcome {
        let mut removed = false;
        self.root = Self::remove_node(self.root.take(), name, &mut removed);
        if removed {
            self.len -= 1;
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        }
    }

    /// Release every node. Safe on an empty index.
    pub fn clear(&mut self) {
        // Dropping a box releases its children before the node itself.
        self.root = None;
        self.len = 0;
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Point lookup by name, O(log n)
    pub fn get(&self, name: &str) -> Option<&Contact> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match name.cmp(node.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.contact),
            };
        }
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// First contact (in name order) with this number.
    ///
    /// The tree is not ordered by number, so this is an O(n) scan.
    pub fn find_by_number(&self, number: &str) -> Option<&Contact> {
        self.iter().find(|c| c.number == number)
    }

    /// Contacts in `group`, ascending by name. O(n).
    ///
    /// The iterator keeps its own copy of `group`, so it borrows only the index.
    pub fn filter_group<'a>(&'a self, group: &str) -> impl Iterator<Item = &'a Contact> + 'a {
        let group = group.to_owned();
        self.iter().filter(move |c| c.group == group)
    }

    /// Contacts whose name contains `fragment`, ascending by name. O(n).
    pub fn search_partial<'a>(&'a self, fragment: &str) -> impl Iterator<Item = &'a Contact> + 'a {
        let fragment = fragment.to_owned();
        self.iter().filter(move |c| c.name.contains(fragment.as_str()))
    }

    /// Smallest name
    pub fn min(&self) -> Option<&Contact> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.contact)
    }

    /// Largest name
    pub fn max(&self) -> Option<&Contact> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.contact)
    }

    /// In-order iterator. Each call starts a fresh enumeration.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the whole tree; 0 when empty
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Walk the whole tree and verify ordering, balance, cached heights
    /// and the node count. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut counted = 0;
        let mut previous: Option<&str> = None;
        Self::check_node(&self.root, &mut previous, &mut counted)?;
        if counted != self.len {
            return Err(InvariantViolation::Count {
                recorded: self.len,
                counted,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn get_mut(&mut self, name: &str) -> Option<&mut Contact> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match name.cmp(node.key()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.contact),
            }
        }
        None
    }

    fn insert_node(
        link: Link,
        key: &str,
        contact: Contact,
        outcome: &mut InsertOutcome,
    ) -> Box<Node> {
        let Some(mut node) = link else {
            *outcome = InsertOutcome::Inserted;
            return Node::leaf(contact);
        };

        match key.cmp(node.key()) {
            Ordering::Less => {
                node.left = Some(Self::insert_node(node.left.take(), key, contact, outcome));
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_node(node.right.take(), key, contact, outcome));
            }
            Ordering::Equal => return node,
        }

        if *outcome == InsertOutcome::AlreadyExists {
            return node;
        }
        rebalance_after_insert(node, key)
    }

    fn remove_node(link: Link, name: &str, removed: &mut bool) -> Link {
        let mut node = link?;

        match name.cmp(node.key()) {
            Ordering::Less => node.left = Self::remove_node(node.left.take(), name, removed),
            Ordering::Greater => node.right = Self::remove_node(node.right.take(), name, removed),
            Ordering::Equal => {
                *removed = true;
                match (node.left.take(), node.right.take()) {
                    (None, None) => return None,
                    (Some(child), None) | (None, Some(child)) => return Some(child),
                    (Some(left), Some(right)) => {
                        let (rest, successor) = Self::take_min(right);
                        node.contact = successor;
                        node.left = Some(left);
                        node.right = rest;
                    }
                }
            }
        }

        if !*removed {
            return Some(node);
        }
        Some(rebalance_after_delete(node))
    }

    /// Unlink the leftmost node of `node`, returning the rebalanced
    /// remainder and the unlinked payload.
    fn take_min(mut node: Box<Node>) -> (Link, Contact) {
        match node.left.take() {
            None => {
                let Node { contact, right, .. } = *node;
                (right, contact)
            }
            Some(left) => {
                let (rest, min) = Self::take_min(left);
                node.left = rest;
                (Some(rebalance_after_delete(node)), min)
            }
        }
    }

    fn check_node<'a>(
        link: &'a Link,
        previous: &mut Option<&'a str>,
        counted: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        let Some(node) = link else {
            return Ok(0);
        };

        let left = Self::check_node(&node.left, previous, counted)?;

        if let Some(prev) = *previous {
            if prev >= node.key() {
                return Err(InvariantViolation::Order {
                    left: prev.to_string(),
                    right: node.key().to_string(),
                });
            }
        }
        *previous = Some(node.key());
        *counted += 1;

        let right = Self::check_node(&node.right, previous, counted)?;

        let balance = left as i64 - right as i64;
        if balance.abs() > 1 {
            return Err(InvariantViolation::Balance {
                name: node.key().to_string(),
                balance,
            });
        }

        let actual = 1 + left.max(right);
        if node.height != actual {
            return Err(InvariantViolation::Height {
                name: node.key().to_string(),
                cached: node.height,
                actual,
            });
        }

        Ok(actual)
    }
}

impl<'a> IntoIterator for &'a ContactIndex {
    type Item = &'a Contact;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending-name iterator over a [`ContactIndex`]
pub struct Iter<'a> {
    /// Ancestors still to be visited, deepest last
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.contact)
    }
}
