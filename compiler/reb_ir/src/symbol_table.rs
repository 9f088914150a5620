//! Sharded symbol table.
//!
//! Words are interned case-preserving: `Foo` and `foo` are distinct
//! symbols. Interned text is leaked so lookups can hand out `&'static str`
//! without holding a shard lock.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Symbol;

struct Shard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Shard {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        }
    }

    fn with_empty() -> Self {
        let mut shard = Self::new();
        let empty: &'static str = "";
        shard.map.insert(empty, 0);
        shard.strings.push(empty);
        shard
    }
}

/// Error when interning a symbol fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("symbol shard {shard_idx} exceeded capacity: {count} symbols")]
    ShardOverflow { shard_idx: usize, count: usize },
}

/// Thread-safe symbol interner.
///
/// Per-shard `RwLock`s let independent scan sessions on different threads
/// share one table.
pub struct SymbolTable {
    shards: [RwLock<Shard>; Symbol::NUM_SHARDS],
    total_count: AtomicUsize,
}

impl SymbolTable {
    pub fn new() -> Self {
        let shards = std::array::from_fn(|i| {
            if i == 0 {
                RwLock::new(Shard::with_empty())
            } else {
                RwLock::new(Shard::new())
            }
        });
        Self {
            shards,
            total_count: AtomicUsize::new(1),
        }
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Symbol::NUM_SHARDS
    }

    /// Intern `s`, or report shard overflow.
    pub fn try_intern(&self, s: &str) -> Result<Symbol, InternError> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_idx_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        {
            let guard = shard.read();
            if let Some(&local) = guard.map.get(s) {
                return Ok(Symbol::new(shard_idx_u32, local));
            }
        }

        let mut guard = shard.write();
        if let Some(&local) = guard.map.get(s) {
            return Ok(Symbol::new(shard_idx_u32, local));
        }

        let local = u32::try_from(guard.strings.len())
            .ok()
            .filter(|&local| local <= Symbol::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow {
                shard_idx,
                count: guard.strings.len(),
            })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);
        self.total_count.fetch_add(1, Ordering::Relaxed);

        Ok(Symbol::new(shard_idx_u32, local))
    }

    /// Intern `s`. A full shard yields [`Symbol::EMPTY`].
    #[inline]
    pub fn intern(&self, s: &str) -> Symbol {
        self.try_intern(s).unwrap_or(Symbol::EMPTY)
    }

    /// Symbol for `s` if it has been interned.
    pub fn get(&self, s: &str) -> Option<Symbol> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_idx_u32 = shard_idx as u32;
        let guard = self.shards[shard_idx].read();
        guard
            .map
            .get(s)
            .map(|&local| Symbol::new(shard_idx_u32, local))
    }

    /// Text of an interned symbol. Unknown symbols read as `""`.
    pub fn lookup(&self, symbol: Symbol) -> &'static str {
        let guard = self.shards[symbol.shard()].read();
        guard.strings.get(symbol.local()).copied().unwrap_or("")
    }

    /// Number of interned symbols, including the empty string.
    pub fn len(&self) -> usize {
        self.total_count.load(Ordering::Relaxed)
    }

    /// True when only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
