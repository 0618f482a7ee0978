//! Transposition table for caching search results
//!
//! Results are indexed by Zobrist hash. A stored score is only reused at the
//! same remaining depth it was searched to, because leaf scores are
//! heuristic and a deeper or shallower result would change what the search
//! returns.
//!
//! # Example
//!
//! ```
//! use kinarow::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1024);
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 3, 0.25, EntryType::Exact);
//!
//! assert_eq!(tt.probe(hash, 3, -1.0, 1.0), Some(0.25));
//! assert_eq!(tt.probe(hash, 4, -1.0, 1.0), None);
//! ```

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub hash: u64,
    /// Remaining depth the entry was searched to
    pub depth: u8,
    pub score: f64,
    pub entry_type: EntryType,
}

/// Direct-mapped transposition table.
///
/// Each hash maps to one slot; a colliding store replaces the slot when it
/// is empty, holds the same position, or was searched no deeper.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a table with `capacity` slots (at least 1024).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let size = capacity.max(1024);
        Self {
            entries: vec![None; size],
            size,
        }
    }

    /// Probe for a usable score at exactly `depth`.
    ///
    /// Bound entries are only usable when they already decide the window.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: u8, alpha: f64, beta: f64) -> Option<f64> {
        let idx = (hash as usize) % self.size;
        let entry = self.entries[idx]?;

        if entry.hash != hash || entry.depth != depth {
            return None;
        }

        match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(entry.score),
            EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Store a search result.
    pub fn store(&mut self, hash: u64, depth: u8, score: f64, entry_type: EntryType) {
        let idx = (hash as usize) % self.size;

        // Replace if: empty, same position, or new search is at least as deep
        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                entry_type,
            });
        }
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(1 << 16)
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: u64 = 0x1234_5678_9ABC_DEF0;

    #[test]
    fn test_tt_store_probe_exact() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 0.3, EntryType::Exact);
        assert_eq!(tt.probe(HASH, 5, -1.0, 1.0), Some(0.3));
    }

    #[test]
    fn test_tt_depth_must_match() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 3, 0.3, EntryType::Exact);
        assert_eq!(tt.probe(HASH, 5, -1.0, 1.0), None);
        assert_eq!(tt.probe(HASH, 2, -1.0, 1.0), None);
    }

    #[test]
    fn test_tt_lower_bound_cutoff() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 4, 0.5, EntryType::LowerBound);
        assert_eq!(tt.probe(HASH, 4, -1.0, 0.4), Some(0.5));
        assert_eq!(tt.probe(HASH, 4, -1.0, 0.6), None);
    }

    #[test]
    fn test_tt_upper_bound_cutoff() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 4, -0.2, EntryType::UpperBound);
        assert_eq!(tt.probe(HASH, 4, 0.0, 1.0), Some(-0.2));
        assert_eq!(tt.probe(HASH, 4, -0.5, 1.0), None);
    }

    #[test]
    fn test_tt_hash_mismatch() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 2, 0.1, EntryType::Exact);
        assert_eq!(tt.probe(HASH ^ 1, 2, -1.0, 1.0), None);
    }

    #[test]
    fn test_tt_clear_and_stats() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(HASH, 1, 0.0, EntryType::Exact);
        tt.store(HASH + 1, 1, 0.0, EntryType::Exact);
        assert_eq!(tt.stats().used, 2);
        assert_eq!(tt.stats().size, 1024);
        tt.clear();
        assert_eq!(tt.stats().used, 0);
    }
}
