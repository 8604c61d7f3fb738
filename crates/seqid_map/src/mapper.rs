//! The interning registry.
//!
//! `SeqIdMapper` owns one classification tree per subtype and routes every
//! lookup and matching query to the tree for the handle's subtype. A single
//! process-wide instance is available through [`SeqIdMapper::instance`];
//! tests and embedders may construct private mappers with
//! [`SeqIdMapper::new`].

use std::sync::{Arc, OnceLock};

use seqid_ir::{SeqId, SeqIdChoice, SeqIdError};

use crate::config::MapperConfig;
use crate::info::Packed;
use crate::tree::{GiTree, PlainTree, SeqIdTree, TextseqTree};
use crate::{SeqIdHandle, SeqIdMatches, WeakMatch};

/// Interning registry: maps identifier values to interned entries.
pub struct SeqIdMapper {
    config: MapperConfig,
    /// Indexed by `SeqIdChoice::index()`.
    trees: Vec<Arc<dyn SeqIdTree>>,
    gi: Arc<GiTree>,
}

static INSTANCE: OnceLock<Arc<SeqIdMapper>> = OnceLock::new();

impl SeqIdMapper {
    /// Create a mapper. Entries it mints hold a weak back-reference to it.
    pub fn new(config: MapperConfig) -> Arc<Self> {
        tracing::debug!(?config, "creating seq-id mapper");
        Arc::new_cyclic(|mapper| {
            let gi = Arc::new(GiTree::new(mapper.clone(), config.pack_gis));
            let trees = SeqIdChoice::ALL
                .into_iter()
                .map(|choice| -> Arc<dyn SeqIdTree> {
                    match choice {
                        SeqIdChoice::Gi => Arc::clone(&gi) as Arc<dyn SeqIdTree>,
                        c if c.is_textseq() => {
                            Arc::new(TextseqTree::new(c, mapper.clone(), config.pack_text_ids))
                        }
                        c => Arc::new(PlainTree::new(c, mapper.clone())),
                    }
                })
                .collect();
            SeqIdMapper { config, trees, gi }
        })
    }

    /// The process-wide mapper, created on first use with
    /// [`MapperConfig::from_env`] and alive until process exit.
    pub fn instance() -> &'static Arc<SeqIdMapper> {
        INSTANCE.get_or_init(|| SeqIdMapper::new(MapperConfig::from_env()))
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Classification tree for a subtype.
    #[inline]
    pub fn tree(&self, choice: SeqIdChoice) -> &dyn SeqIdTree {
        &*self.trees[choice.index()]
    }

    /// Look up or create the handle for `id`.
    pub fn get_handle(&self, id: &SeqId) -> SeqIdHandle {
        match id {
            SeqId::Gi(gi) => self.gi.get_gi_handle(*gi),
            _ => self.tree(id.which()).find_or_create(id),
        }
    }

    /// GI fast path: no `SeqId` is built.
    pub fn get_gi_handle(&self, gi: Packed) -> SeqIdHandle {
        self.gi.get_gi_handle(gi)
    }

    /// Parse `text` and look up or create its handle.
    pub fn parse_handle(&self, text: &str) -> Result<SeqIdHandle, SeqIdError> {
        let id = SeqId::parse(text)?;
        Ok(self.get_handle(&id))
    }

    fn tree_of(&self, handle: &SeqIdHandle) -> Option<&dyn SeqIdTree> {
        handle.try_which().map(|choice| self.tree(choice))
    }

    /// True if `h1` is the same as, or more generic than, `h2`.
    pub fn matches(&self, h1: &SeqIdHandle, h2: &SeqIdHandle) -> bool {
        if h1 == h2 {
            return !h1.is_empty();
        }
        match (h1.try_which(), h2.try_which()) {
            (Some(a), Some(b)) if a == b => self.tree(a).matches(h1, h2),
            _ => false,
        }
    }

    /// True if `h1` is a better version of the same identifier than `h2`.
    pub fn is_better(&self, h1: &SeqIdHandle, h2: &SeqIdHandle) -> bool {
        match (h1.try_which(), h2.try_which()) {
            (Some(a), Some(b)) if a == b => self.tree(a).is_better_version(h1, h2),
            _ => false,
        }
    }

    pub fn have_matching_handles(&self, handle: &SeqIdHandle, weak: WeakMatch) -> bool {
        self.tree_of(handle).is_some_and(|tree| {
            tree.have_matching_handles() || (weak == WeakMatch::Allow && handle.which().is_textseq())
        })
    }

    pub fn have_reverse_match(&self, handle: &SeqIdHandle, weak: WeakMatch) -> bool {
        self.tree_of(handle).is_some_and(|tree| {
            tree.have_reverse_match() || (weak == WeakMatch::Allow && handle.which().is_textseq())
        })
    }

    /// Add `handle` and every interned handle it matches to.
    #[tracing::instrument(level = "debug", skip_all, fields(handle = %handle))]
    pub fn matching_handles(&self, handle: &SeqIdHandle, matches: &mut SeqIdMatches, weak: WeakMatch) {
        self.collect_matches(handle, matches, weak, false);
    }

    /// Add `handle` and every interned handle that matches to it.
    #[tracing::instrument(level = "debug", skip_all, fields(handle = %handle))]
    pub fn reverse_matching_handles(
        &self,
        handle: &SeqIdHandle,
        matches: &mut SeqIdMatches,
        weak: WeakMatch,
    ) {
        self.collect_matches(handle, matches, weak, true);
    }

    fn collect_matches(
        &self,
        handle: &SeqIdHandle,
        matches: &mut SeqIdMatches,
        weak: WeakMatch,
        reverse: bool,
    ) {
        let Some(choice) = handle.try_which() else {
            return;
        };
        // Trees append under their own read lock; the set is extended only
        // after every lock is released.
        let mut found = Vec::new();
        let tree = self.tree(choice);
        if reverse {
            tree.find_reverse_matches(handle, &mut found);
        } else {
            tree.find_matches(handle, &mut found);
        }
        if weak == WeakMatch::Allow && choice.is_textseq() {
            if let Some(id) = handle.value_logged() {
                if let Some(text) = id.textseq() {
                    for other in SeqIdChoice::ALL {
                        if other != choice && other.is_textseq() {
                            self.tree(other).collect_text_matches(text, reverse, &mut found);
                        }
                    }
                }
            }
        }
        tracing::debug!(count = found.len(), "matching handles collected");
        matches.extend(found);
    }

    /// Number of entries currently held by all trees.
    pub fn live_entries(&self) -> usize {
        self.trees.iter().map(|tree| tree.live_entries()).sum()
    }

    /// Number of entries removed after their last handle was released.
    pub fn dropped_entries(&self) -> u64 {
        self.trees.iter().map(|tree| tree.dropped_entries()).sum()
    }
}

impl std::fmt::Debug for SeqIdMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeqIdMapper")
            .field("config", &self.config)
            .field("live_entries", &self.live_entries())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
