//! GI tree: one shared entry for every non-zero GI.

use std::num::NonZeroI64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use seqid_ir::SeqId;

use super::{is_same, SeqIdTree};
use crate::info::{InfoKind, Packed, SeqIdInfo};
use crate::{SeqIdHandle, SeqIdMapper};

#[derive(Default)]
struct GiState {
    /// Family entry behind every packed GI handle.
    shared: Option<Arc<SeqIdInfo>>,
    /// Unpacked GIs: always `gi|0`, every GI when packing is disabled.
    plain: FxHashMap<Packed, Arc<SeqIdInfo>>,
}

pub(crate) struct GiTree {
    mapper: Weak<SeqIdMapper>,
    pack: bool,
    state: RwLock<GiState>,
    dropped: AtomicU64,
}

impl GiTree {
    pub(crate) fn new(mapper: Weak<SeqIdMapper>, pack: bool) -> Self {
        GiTree {
            mapper,
            pack,
            state: RwLock::new(GiState::default()),
            dropped: AtomicU64::new(0),
        }
    }

    pub(crate) fn get_gi_handle(&self, gi: Packed) -> SeqIdHandle {
        match NonZeroI64::new(gi) {
            Some(packed) if self.pack => self.packed_handle(packed),
            _ => self.plain_handle(gi),
        }
    }

    fn packed_handle(&self, gi: NonZeroI64) -> SeqIdHandle {
        {
            let state = self.state.read();
            if let Some(info) = &state.shared {
                return SeqIdHandle::packed_with(info, gi, 0);
            }
        }

        let mut state = self.state.write();
        let info = state.shared.get_or_insert_with(|| {
            tracing::trace!("creating shared gi entry");
            Arc::new(SeqIdInfo::gi_family(self.mapper.clone()))
        });
        SeqIdHandle::packed_with(info, gi, 0)
    }

    fn plain_handle(&self, gi: Packed) -> SeqIdHandle {
        {
            let state = self.state.read();
            if let Some(info) = state.plain.get(&gi) {
                return SeqIdHandle::bound(info);
            }
        }

        let mut state = self.state.write();
        let info = state.plain.entry(gi).or_insert_with(|| {
            tracing::trace!(gi, "creating gi entry");
            Arc::new(SeqIdInfo::plain(Arc::new(SeqId::Gi(gi)), self.mapper.clone()))
        });
        SeqIdHandle::bound(info)
    }
}

impl SeqIdTree for GiTree {
    fn find_or_create(&self, id: &SeqId) -> SeqIdHandle {
        let Some(gi) = id.gi() else {
            panic!("gi tree asked to intern {id}");
        };
        self.get_gi_handle(gi)
    }

    fn drop_info(&self, info: &SeqIdInfo) {
        let mut state = self.state.write();
        if info.is_locked() {
            return;
        }
        let removed = match info.kind() {
            InfoKind::GiFamily => {
                if state.shared.as_ref().is_some_and(|shared| is_same(shared, info)) {
                    state.shared = None;
                    true
                } else {
                    false
                }
            }
            InfoKind::Plain(id) => match id.gi() {
                Some(gi) if state.plain.get(&gi).is_some_and(|stored| is_same(stored, info)) => {
                    state.plain.remove(&gi);
                    true
                }
                _ => false,
            },
            InfoKind::PackedAccession(_) => false,
        };
        if removed {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(?info, "dropped gi entry");
        }
    }

    fn live_entries(&self) -> usize {
        let state = self.state.read();
        usize::from(state.shared.is_some()) + state.plain.len()
    }

    fn dropped_entries(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
