use std::collections::HashSet;

/// Tokens already surfaced as a tick's best opportunity during one monitoring session.
///
/// Entries are never removed: a token inserted here is excluded from every later
/// scan that shares this memory.
#[derive(Debug, Clone, Default)]
pub struct DedupMemory {
    seen: HashSet<String>,
}

impl DedupMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.seen.contains(token)
    }

    /// Returns `false` if the token was already present.
    pub fn insert(&mut self, token: &str) -> bool {
        self.seen.insert(token.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
