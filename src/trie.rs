//! Prefix trie over the compressed names.
//!
//! Building walks every key one UTF-16 code unit at a time, so a character
//! outside the Basic Multilingual Plane is split between two edges when two
//! names share its high surrogate. A key that is a proper prefix of another
//! keeps its value in the branch's terminal slot, which is written as the
//! reserved `!` edge on the wire. Optimizing then merges every chain of
//! single-child branches into one multi-unit edge.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::constants::TERMINAL_EDGE;
use crate::encoder::CompressedForm;
use crate::rle::Token;
use crate::value::{Key, Value};

/// A trie node: either a value or a set of labelled edges
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Token),
    Branch(Branch),
}

/// Interior trie node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Branch {
    /// Value of the key that ends exactly here
    pub terminal: Option<Token>,
    /// Child edges. Labels are single code units until the trie is optimized.
    pub edges: IndexMap<Key, Node>,
}

impl Branch {
    fn with_terminal(value: Token) -> Self {
        Self {
            terminal: Some(value),
            edges: IndexMap::new(),
        }
    }

    /// Number of children, counting the terminal slot as one
    #[inline]
    pub fn child_count(&self) -> usize {
        self.edges.len() + usize::from(self.terminal.is_some())
    }

    /// Wire representation: an object with one member per edge, plus `!`
    /// for the terminal value
    pub fn to_value(&self) -> Value {
        let mut members = IndexMap::with_capacity(self.child_count());
        if let Some(terminal) = &self.terminal {
            members.insert(terminal_key(), Value::from(terminal));
        }
        for (label, node) in &self.edges {
            let value = match node {
                Node::Leaf(token) => Value::from(token),
                Node::Branch(branch) => branch.to_value(),
            };
            members.insert(label.clone(), value);
        }
        Value::Object(members)
    }
}

/// Outcome of optimizing a non-root branch
#[derive(Debug, Clone, PartialEq)]
pub enum Optimized {
    /// The branch has several children and stays where it is
    NotCompressible(Branch),
    /// The branch had a single child; the parent appends `label` to its own
    /// edge and points it at `node`
    Collapsed { label: Key, node: Node },
}

/// Build the unoptimized trie for every key of `form`.
///
/// Keys must not contain `!`. An empty key has no path and is skipped.
pub fn build(form: &CompressedForm) -> Branch {
    let mut root = Branch::default();

    for (key, value) in form {
        let units: Vec<u16> = key.encode_utf16().collect();
        let mut cur = &mut root;

        for (i, &unit) in units.iter().enumerate() {
            let last = i + 1 == units.len();

            let node = match cur.edges.entry(Key::from_units(vec![unit])) {
                Entry::Vacant(slot) if last => {
                    slot.insert(Node::Leaf(value.clone()));
                    break;
                }
                Entry::Vacant(slot) => slot.insert(Node::Branch(Branch::default())),
                Entry::Occupied(slot) => slot.into_mut(),
            };

            if last {
                match node {
                    Node::Branch(branch) => branch.terminal = Some(value.clone()),
                    Node::Leaf(existing) => *existing = value.clone(),
                }
                break;
            }

            // a shorter key ended here: keep its value as the terminal
            if let Node::Leaf(existing) = node {
                *node = Node::Branch(Branch::with_terminal(std::mem::take(existing)));
            }
            let Node::Branch(next) = node else { break };
            cur = next;
        }
    }

    root
}

/// Optimize the root of a trie, merging single-child chains below it.
///
/// The root itself is never collapsed into a label: with a single child it
/// comes back holding just that (fully merged) edge.
pub fn optimize(root: Branch) -> Branch {
    optimize_children(root)
}

/// Optimize a non-root branch
pub fn optimize_branch(branch: Branch) -> Optimized {
    let mut branch = optimize_children(branch);

    if branch.child_count() != 1 {
        return Optimized::NotCompressible(branch);
    }

    match branch.edges.pop() {
        Some((label, node)) => Optimized::Collapsed { label, node },
        None => match branch.terminal.take() {
            Some(value) => Optimized::Collapsed {
                label: terminal_key(),
                node: Node::Leaf(value),
            },
            None => Optimized::NotCompressible(branch),
        },
    }
}

fn optimize_children(mut branch: Branch) -> Branch {
    let edges = std::mem::take(&mut branch.edges);

    for (mut label, node) in edges {
        match node {
            Node::Branch(child) => match optimize_branch(child) {
                Optimized::Collapsed { label: tail, node } => {
                    label.extend(&tail);
                    branch.edges.insert(label, node);
                }
                Optimized::NotCompressible(child) => {
                    branch.edges.insert(label, Node::Branch(child));
                }
            },
            leaf @ Node::Leaf(_) => {
                branch.edges.insert(label, leaf);
            }
        }
    }

    branch
}

fn terminal_key() -> Key {
    Key::from_units(vec![TERMINAL_EDGE])
}
