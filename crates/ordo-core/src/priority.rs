//! Priority sources and the policy for nodes that have no priority.
//!
//! When several nodes are ready at once, the resolver places the one with the
//! smallest `(rank, node)` key first. A node's rank comes from its priority
//! key if the source has one, otherwise from [`MissingPriority`].

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A caller-supplied source of priority keys. Smaller keys are preferred.
pub trait Priority<N> {
    type Key: Ord;

    /// The priority of `node`, or `None` if the source has none for it.
    fn priority(&self, node: &N) -> Option<Self::Key>;
}

/// A priority source with no keys at all: ties are broken by node order alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPriority;

impl<N> Priority<N> for NoPriority {
    type Key = ();

    fn priority(&self, _node: &N) -> Option<()> {
        None
    }
}

/// A priority source backed by a closure. See [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnPriority<F>(F);

/// Use a closure as a priority source.
///
/// ```
/// use ordo_core::priority::{from_fn, Priority};
///
/// let by_len = from_fn(|name: &&str| Some(name.len()));
/// assert_eq!(by_len.priority(&"core"), Some(4));
/// ```
pub fn from_fn<N, K, F>(f: F) -> FnPriority<F>
where
    K: Ord,
    F: Fn(&N) -> Option<K>,
{
    FnPriority(f)
}

impl<N, K, F> Priority<N> for FnPriority<F>
where
    K: Ord,
    F: Fn(&N) -> Option<K>,
{
    type Key = K;

    fn priority(&self, node: &N) -> Option<K> {
        (self.0)(node)
    }
}

impl<N: Ord, K: Ord + Clone> Priority<N> for BTreeMap<N, K> {
    type Key = K;

    fn priority(&self, node: &N) -> Option<K> {
        self.get(node).cloned()
    }
}

impl<N: Ord, K: Ord + Clone> Priority<N> for &BTreeMap<N, K> {
    type Key = K;

    fn priority(&self, node: &N) -> Option<K> {
        self.get(node).cloned()
    }
}

impl<N: Hash + Eq, K: Ord + Clone> Priority<N> for HashMap<N, K> {
    type Key = K;

    fn priority(&self, node: &N) -> Option<K> {
        self.get(node).cloned()
    }
}

impl<N: Hash + Eq, K: Ord + Clone> Priority<N> for &HashMap<N, K> {
    type Key = K;

    fn priority(&self, node: &N) -> Option<K> {
        self.get(node).cloned()
    }
}

/// Where nodes without a priority key sort relative to nodes that have one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPriority {
    /// Unprioritised nodes lose every tie against prioritised ones.
    #[default]
    Last,
    /// Unprioritised nodes win every tie against prioritised ones.
    First,
}

impl MissingPriority {
    /// Turn an optional key into a totally ordered rank under this policy.
    pub fn rank<K: Ord>(self, key: Option<K>) -> Rank<K> {
        let bucket = match (self, key.is_some()) {
            (MissingPriority::Last, true) | (MissingPriority::First, false) => 0,
            (MissingPriority::Last, false) | (MissingPriority::First, true) => 1,
        };
        Rank { bucket, key }
    }
}

/// A node's position in the tie-break order, before node identity is consulted.
///
/// Within a bucket either every key is present or every key is absent, so
/// comparison is by bucket, then by key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank<K> {
    bucket: u8,
    key: Option<K>,
}

impl<K> Rank<K> {
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }
}
