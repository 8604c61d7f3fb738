//! Classification trees.
//!
//! One tree per identifier subtype decides how values of that subtype are
//! interned, which handles match each other, and removes entries whose last
//! lock was released.
//!
//! # Locking
//!
//! Every tree guards its tables with one `RwLock`:
//! - lookups take the read lock and return on a hit (fast path)
//! - creation takes the write lock and re-checks before inserting
//! - `drop_info` takes the write lock, re-checks `is_locked()` and removes
//!   only the exact entry it was called for
//!
//! Handles are created while the lock is held but never dropped under it,
//! so releasing a lock can never re-enter a tree.

mod gi;
mod plain;
mod textseq;

pub(crate) use gi::GiTree;
pub(crate) use plain::PlainTree;
pub(crate) use textseq::TextseqTree;

use std::sync::Arc;

use seqid_ir::{SeqId, TextseqId};

use crate::info::SeqIdInfo;
use crate::SeqIdHandle;

/// Per-subtype interning and matching rules.
pub trait SeqIdTree: Send + Sync {
    /// Look up or create the handle for `id`.
    ///
    /// # Panics
    /// Panics if `id` belongs to a different subtype than this tree.
    fn find_or_create(&self, id: &SeqId) -> SeqIdHandle;

    /// Remove `info` from this tree's index if it is still unlocked.
    /// Called when its lock counter drops to zero.
    fn drop_info(&self, info: &SeqIdInfo);

    fn have_matching_handles(&self) -> bool {
        false
    }

    fn have_reverse_match(&self) -> bool {
        false
    }

    /// Append `handle` and every interned handle it matches to.
    fn find_matches(&self, handle: &SeqIdHandle, out: &mut Vec<SeqIdHandle>) {
        out.push(handle.clone());
    }

    /// Append `handle` and every interned handle that matches to it.
    fn find_reverse_matches(&self, handle: &SeqIdHandle, out: &mut Vec<SeqIdHandle>) {
        out.push(handle.clone());
    }

    /// True if `h1` is the same as, or more generic than, `h2`.
    fn matches(&self, h1: &SeqIdHandle, h2: &SeqIdHandle) -> bool {
        h1 == h2
    }

    fn is_better_version(&self, _h1: &SeqIdHandle, _h2: &SeqIdHandle) -> bool {
        false
    }

    /// Weak matching across text-id subtypes: append the handles of this
    /// tree that `text` matches to (or, with `reverse`, that match `text`).
    fn collect_text_matches(&self, _text: &TextseqId, _reverse: bool, _out: &mut Vec<SeqIdHandle>) {}

    /// Entries currently indexed.
    fn live_entries(&self) -> usize;

    /// Entries removed after their last handle was released.
    fn dropped_entries(&self) -> u64;
}

/// True if `stored` is the very entry `info`.
#[inline]
fn is_same(stored: &Arc<SeqIdInfo>, info: &SeqIdInfo) -> bool {
    std::ptr::eq(Arc::as_ptr(stored), info)
}

#[cfg(test)]
mod tests;
