//! Least Recently Used (LRU) Tag Stack.
//!
//! Each cache set keeps its resident tags in recency order: the front of the
//! queue is the least recently used tag, the back is the most recently used.
//! A hit moves the tag to the back; a miss pushes the new tag to the back and,
//! when the set is full, evicts the tag at the front.
//!
//! # Performance
//!
//! - `access()`: O(W) where W is the associativity.
//! - Space: O(W) per set, only resident tags are stored.

use std::collections::VecDeque;

/// Recency-ordered tags of one cache set.
#[derive(Clone, Debug)]
pub struct LruSet {
    ways: usize,
    tags: VecDeque<u64>,
}

/// Result of presenting a tag to a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetAccess {
    /// Tag was resident and is now MRU.
    Hit,
    /// Tag was installed; `evicted` is the LRU tag that made room, if any.
    Miss {
        /// Tag removed to make room.
        evicted: Option<u64>,
    },
}

impl LruSet {
    /// Creates an empty set that holds at most `ways` tags.
    pub fn new(ways: usize) -> Self {
        Self {
            ways,
            tags: VecDeque::new(),
        }
    }

    /// Looks up `tag`, updating recency and installing it on a miss.
    pub fn access(&mut self, tag: u64) -> SetAccess {
        if let Some(pos) = self.tags.iter().position(|&t| t == tag) {
            if let Some(t) = self.tags.remove(pos) {
                self.tags.push_back(t);
            }
            return SetAccess::Hit;
        }
        let evicted = if self.tags.len() >= self.ways {
            self.tags.pop_front()
        } else {
            None
        };
        self.tags.push_back(tag);
        SetAccess::Miss { evicted }
    }

    /// `true` if `tag` is resident. Does not touch recency.
    pub fn contains(&self, tag: u64) -> bool {
        self.tags.contains(&tag)
    }

    /// Resident tags, least recently used first.
    pub fn tags(&self) -> impl Iterator<Item = u64> + '_ {
        self.tags.iter().copied()
    }

    /// Number of resident tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// `true` when no tag is resident.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
